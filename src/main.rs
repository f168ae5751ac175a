use anyhow::{Result, anyhow};
use clap::{ArgGroup, Parser};
use colored::*;
use log::LevelFilter;
use wslpath::config::{self, Config};
use wslpath::{Direction, FindmntSource, MountMapping, convert_path, print_line};

/// Convert between Linux and Windows paths in WSL.
///
/// If no conversion is given explicitly, one is guessed from PATH.
#[derive(Parser, Debug)]
#[command(name = "wslpath", author, version, about)]
#[command(group(ArgGroup::new("direction").args(["windows", "mixed", "unix"])))]
struct Args {
    /// Path to convert
    #[arg(value_name = "PATH", required_unless_present = "mounts")]
    path: Option<String>,

    /// Print the Windows path equivalent to PATH, using backslashes
    #[arg(short = 'w')]
    windows: bool,

    /// Print the Windows path equivalent to PATH, using forward slashes
    #[arg(short = 'm')]
    mixed: bool,

    /// Print the Linux path equivalent to PATH
    #[arg(short = 'u')]
    unix: bool,

    /// Print the active Linux <-> Windows root mapping and exit
    #[arg(long, conflicts_with_all = ["path", "direction"])]
    mounts: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Program used to list mounts (default: $WSLPATH_FINDMNT or findmnt)
    #[arg(long, value_name = "PROG")]
    findmnt: Option<String>,

    /// Filesystem types bridging the two namespaces (default: $WSLPATH_FSTYPE or 9p)
    #[arg(long, value_name = "TYPES")]
    fstype: Option<String>,
}

impl Args {
    fn direction(&self) -> Option<Direction> {
        if self.windows {
            Some(Direction::ToWindows)
        } else if self.mixed {
            Some(Direction::ToWindowsMixed)
        } else if self.unix {
            Some(Direction::ToLinux)
        } else {
            None
        }
    }
}

fn init_logger(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn run(args: Args) -> Result<()> {
    if !config::is_wsl() {
        log::warn!("WSL_DISTRO_NAME is not set, this does not look like a WSL distribution");
    }

    let direction = args.direction();
    let config = Config::from_env().with_overrides(args.findmnt, args.fstype);
    let source = FindmntSource::new(config);

    if args.mounts {
        let mapping = MountMapping::resolve(&source)?;
        for (linux_root, windows_root) in mapping.iter() {
            print_line!("{linux_root}\t{windows_root}");
        }
        return Ok(());
    }

    let path = args.path.ok_or_else(|| anyhow!("PATH is required"))?;
    let converted = convert_path(&path, direction, &source)?;
    print_line!("{converted}");
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
