use std::collections::BTreeMap;

use crate::error::{Result, WslPathError};

/// Which side of the bridge a path is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Linux,
    Windows,
}

impl Namespace {
    pub fn separator(self) -> char {
        match self {
            Namespace::Linux => '/',
            Namespace::Windows => '\\',
        }
    }
}

/// A root matched against a path
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedRoot<'a> {
    /// The matched root, as spelled in the mount table
    pub root: &'a str,
    /// The root it maps to in the other namespace
    pub target: &'a str,
    /// The rest of the path after the root, starting with a separator
    pub leaf: &'a str,
}

/// Find the single root in `roots` that `path` lives under.
///
/// A root matches only when immediately followed by the namespace's
/// separator, so `/mnt/c` never matches `/mnt/cd/...`. Overlapping roots
/// are reported as [`WslPathError::AmbiguousRoot`], not resolved.
pub fn find_root<'a>(
    roots: &'a BTreeMap<String, String>,
    path: &'a str,
    namespace: Namespace,
) -> Result<ResolvedRoot<'a>> {
    let separator = namespace.separator();
    let candidates: Vec<(&String, &String)> = roots
        .iter()
        .filter(|(root, _)| {
            path.strip_prefix(root.as_str())
                .is_some_and(|rest| rest.starts_with(separator))
        })
        .collect();

    log::trace!("root candidates for {path}: {candidates:?}");

    match candidates[..] {
        [] => Err(WslPathError::NoRootFound {
            path: path.to_string(),
        }),
        [(root, target)] => Ok(ResolvedRoot {
            root: root.as_str(),
            target: target.as_str(),
            leaf: &path[root.len()..],
        }),
        _ => Err(WslPathError::AmbiguousRoot {
            path: path.to_string(),
            roots: candidates.iter().map(|(root, _)| root.to_string()).collect(),
        }),
    }
}

/// Whether `path` is drive-relative (`C:foo`, `C:`) for one of the drive
/// roots in `roots`
pub fn is_drive_relative(roots: &BTreeMap<String, String>, path: &str) -> bool {
    roots
        .keys()
        .filter(|root| root.ends_with(':'))
        .any(|root| path.strip_prefix(root.as_str()).is_some_and(|rest| !rest.starts_with('\\')))
}
