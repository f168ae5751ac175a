use serde::Deserialize;
use std::process::Command;

use super::{MountRecord, MountSource};
use crate::config::Config;
use crate::error::{Result, WslPathError};

/// `findmnt -J` output; only the fields we read
#[derive(Debug, Deserialize)]
struct FindmntOutput {
    filesystems: Vec<FindmntFilesystem>,
}

#[derive(Debug, Deserialize)]
struct FindmntFilesystem {
    target: String,
    source: String,
}

/// Parse the JSON printed by `findmnt -J -l` into mount records
pub fn parse_findmnt_output(json: &str) -> serde_json::Result<Vec<MountRecord>> {
    let output: FindmntOutput = serde_json::from_str(json)?;
    Ok(output
        .filesystems
        .into_iter()
        .map(|fs| MountRecord::new(fs.target, fs.source))
        .collect())
}

/// Mount source backed by the `findmnt` utility, filtered by filesystem type
/// at query time
pub struct FindmntSource {
    config: Config,
}

impl FindmntSource {
    pub fn new(config: Config) -> Self {
        FindmntSource { config }
    }

    fn args(&self) -> [&str; 4] {
        ["-J", "-l", "-t", self.config.fstype.as_str()]
    }
}

impl MountSource for FindmntSource {
    fn name(&self) -> &str {
        "findmnt"
    }

    fn mounts(&self) -> Result<Vec<MountRecord>> {
        let program = self.config.findmnt.as_str();
        log::debug!("running {} {}", program, self.args().join(" "));

        let output = Command::new(program)
            .args(self.args())
            .output()
            .map_err(|e| WslPathError::query(program, format!("failed to run: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        // findmnt exits 1 without output when nothing of that type is mounted
        let no_mounts = output.status.success() || output.status.code() == Some(1);
        if no_mounts && stdout.trim().is_empty() {
            log::debug!("no {} mounts found", self.config.fstype);
            return Ok(Vec::new());
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                msg => format!("exited with {}: {msg}", output.status),
            };
            return Err(WslPathError::query(program, reason));
        }

        parse_findmnt_output(&stdout)
            .map_err(|e| WslPathError::query(program, format!("unexpected output: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSL2_OUTPUT: &str = r#"{
   "filesystems": [
      {
         "target": "/mnt/c",
         "source": "C:\\",
         "fstype": "9p",
         "options": "rw,noatime,dirsync,aname=drvfs;path=C:\\;uid=1000;gid=1000"
      },
      {
         "target": "/mnt/d",
         "source": "D:\\",
         "fstype": "9p",
         "options": "rw,noatime"
      }
   ]
}"#;

    #[test]
    fn test_parse_wsl2_output() {
        let records = parse_findmnt_output(WSL2_OUTPUT).unwrap();
        assert_eq!(
            records,
            vec![MountRecord::new("/mnt/c", "C:"), MountRecord::new("/mnt/d", "D:")]
        );
    }

    #[test]
    fn test_parse_empty_list() {
        let records = parse_findmnt_output(r#"{"filesystems": []}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse_findmnt_output(r#"{"filesystems": [{"target": "/mnt/c"}]}"#).is_err());
        assert!(parse_findmnt_output(r#"{"mounts": []}"#).is_err());
        assert!(parse_findmnt_output("not json").is_err());
    }

    #[test]
    fn test_missing_program_is_query_error() {
        let source = FindmntSource::new(Config {
            findmnt: "/nonexistent/wslpath-findmnt".to_string(),
            fstype: "9p".to_string(),
        });
        match source.mounts() {
            Err(WslPathError::EnvironmentQuery { program, .. }) => {
                assert_eq!(program, "/nonexistent/wslpath-findmnt");
            }
            other => panic!("expected EnvironmentQuery, got {other:?}"),
        }
    }
}
