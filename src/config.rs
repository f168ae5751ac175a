/// Default program used to enumerate mounts
pub const DEFAULT_FINDMNT: &str = "findmnt";

/// Filesystem type WSL uses to expose Windows drives
pub const DEFAULT_FSTYPE: &str = "9p";

/// Runtime configuration for the mount query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Program invoked to list mounts (must speak findmnt's `-J -l -t` flags)
    pub findmnt: String,
    /// Comma-separated filesystem types passed to `-t`
    pub fstype: String,
}

impl Config {
    /// Build a configuration from `WSLPATH_FINDMNT` and `WSLPATH_FSTYPE`,
    /// falling back to the defaults for unset or empty variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Config {
            findmnt: non_empty("WSLPATH_FINDMNT").unwrap_or_else(|| DEFAULT_FINDMNT.to_string()),
            fstype: non_empty("WSLPATH_FSTYPE").unwrap_or_else(|| DEFAULT_FSTYPE.to_string()),
        }
    }

    /// Override settings given explicitly on the command line
    pub fn with_overrides(mut self, findmnt: Option<String>, fstype: Option<String>) -> Self {
        if let Some(findmnt) = findmnt {
            self.findmnt = findmnt;
        }
        if let Some(fstype) = fstype {
            self.fstype = fstype;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            findmnt: DEFAULT_FINDMNT.to_string(),
            fstype: DEFAULT_FSTYPE.to_string(),
        }
    }
}

/// Whether we are running inside a WSL distribution
pub fn is_wsl() -> bool {
    std::env::var_os("WSL_DISTRO_NAME").is_some()
}
