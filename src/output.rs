//! Writing converted paths to stdout.

/// `writeln!` to stdout. A reader that already went away (`wslpath x | head -0`)
/// is not an error: the enclosing function returns `Ok(())`. Other write
/// failures are returned as errors.
#[macro_export]
macro_rules! print_line {
    ($($arg:tt)*) => {{
        use std::io::Write;
        match writeln!(std::io::stdout(), $($arg)*) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }};
}

pub use print_line;
