//! Path translation between the Linux and Windows namespaces.

mod root;

pub use root::{Namespace, ResolvedRoot, find_root};

use std::fmt;

use crate::error::{Result, WslPathError};
use crate::mount::{MountMapping, MountSource};

/// Target of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Linux path to Windows path with backslashes
    ToWindows,
    /// Linux path to Windows path, keeping forward slashes in the leaf
    ToWindowsMixed,
    /// Windows path to Linux path
    ToLinux,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::ToWindows => "to-windows",
            Direction::ToWindowsMixed => "to-windows-mixed",
            Direction::ToLinux => "to-linux",
        };
        f.write_str(name)
    }
}

/// Infer the direction from the path's syntax alone.
///
/// Drive paths (`C:...`) and UNC-style paths (`\...`) go to Linux; absolute
/// Linux paths (`/x`, but not `//x`) go to Windows. Anything else is
/// [`WslPathError::AmbiguousPath`].
pub fn guess(path: &str) -> Result<Direction> {
    let bytes = path.as_bytes();
    match bytes {
        [letter, b':', ..] if letter.is_ascii_alphabetic() => Ok(Direction::ToLinux),
        [b'\\', ..] => Ok(Direction::ToLinux),
        [b'/', next, ..] if *next != b'/' => Ok(Direction::ToWindows),
        _ => Err(WslPathError::AmbiguousPath {
            path: path.to_string(),
        }),
    }
}

/// Converts paths using one mount snapshot
#[derive(Debug, Clone)]
pub struct PathTranslator {
    mapping: MountMapping,
}

impl PathTranslator {
    pub fn new(mapping: MountMapping) -> Self {
        PathTranslator { mapping }
    }

    /// `/mnt/c/Users/me` -> `C:\Users\me`
    pub fn to_windows(&self, path: &str) -> Result<String> {
        let resolved = find_root(self.mapping.linux_to_windows(), path, Namespace::Linux)?;
        Ok(format!("{}{}", resolved.target, resolved.leaf.replace('/', "\\")))
    }

    /// `/mnt/c/Users/me` -> `C:/Users/me`
    pub fn to_windows_mixed(&self, path: &str) -> Result<String> {
        let resolved = find_root(self.mapping.linux_to_windows(), path, Namespace::Linux)?;
        Ok(format!("{}{}", resolved.target, resolved.leaf))
    }

    /// `C:\Users\me` -> `/mnt/c/Users/me`
    ///
    /// Drive-relative paths such as `C:foo` are rejected: there is no
    /// current-drive context to resolve them against.
    pub fn to_linux(&self, path: &str) -> Result<String> {
        let roots = self.mapping.windows_to_linux();
        let resolved = match find_root(roots, path, Namespace::Windows) {
            Err(WslPathError::NoRootFound { .. }) if root::is_drive_relative(roots, path) => {
                return Err(WslPathError::RelativePath {
                    path: path.to_string(),
                });
            }
            other => other?,
        };

        Ok(format!("{}{}", resolved.target, resolved.leaf.replace('\\', "/")))
    }

    /// Convert `path` in the given direction, or the guessed one if `None`
    pub fn convert(&self, path: &str, direction: Option<Direction>) -> Result<String> {
        let direction = match direction {
            Some(direction) => direction,
            None => guess(path)?,
        };
        log::debug!("converting {path} {direction}");

        match direction {
            Direction::ToWindows => self.to_windows(path),
            Direction::ToWindowsMixed => self.to_windows_mixed(path),
            Direction::ToLinux => self.to_linux(path),
        }
    }
}

/// Resolve mounts from `source` and convert a single path.
///
/// The direction is settled before the mount query, so an ambiguous path
/// fails without touching the environment.
pub fn convert_path(
    path: &str,
    direction: Option<Direction>,
    source: &dyn MountSource,
) -> Result<String> {
    let direction = match direction {
        Some(direction) => direction,
        None => guess(path)?,
    };
    let mapping = MountMapping::resolve(source)?;
    PathTranslator::new(mapping).convert(path, Some(direction))
}
