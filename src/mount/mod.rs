//! Mount discovery: which Linux mount point exposes which Windows root.
//!
//! A [`MountMapping`] is built fresh from a [`MountSource`] for every
//! translation and never mutated afterwards.

mod findmnt;

pub use findmnt::{FindmntSource, parse_findmnt_output};

use crate::error::Result;
use std::collections::BTreeMap;

/// One bridged mount: a Linux mount point and the Windows root behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRecord {
    /// Linux-side mount point (e.g. `/mnt/c`)
    pub target: String,
    /// Windows-side root token (e.g. `C:`)
    pub source: String,
}

impl MountRecord {
    /// Create a record, trimming trailing separators from both sides.
    ///
    /// WSL2 reports drive sources as `C:\`; roots are stored as `C:` so that
    /// root matching can append the separator itself.
    pub fn new(target: impl Into<String>, source: impl Into<String>) -> Self {
        MountRecord {
            target: trim_root(target.into(), &['/']),
            source: trim_root(source.into(), &['\\', '/']),
        }
    }
}

fn trim_root(root: String, separators: &[char]) -> String {
    let trimmed = root.trim_end_matches(separators);
    if trimmed.is_empty() || trimmed.len() == root.len() {
        root
    } else {
        trimmed.to_string()
    }
}

/// Something that can enumerate the currently active bridged mounts
pub trait MountSource {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Query the live mount records
    fn mounts(&self) -> Result<Vec<MountRecord>>;
}

/// A fixed mount table, for callers that already know their mounts
#[derive(Debug, Clone, Default)]
pub struct StaticMounts {
    records: Vec<MountRecord>,
}

impl StaticMounts {
    pub fn new(records: Vec<MountRecord>) -> Self {
        StaticMounts { records }
    }
}

impl MountSource for StaticMounts {
    fn name(&self) -> &str {
        "static"
    }

    fn mounts(&self) -> Result<Vec<MountRecord>> {
        Ok(self.records.clone())
    }
}

/// Bidirectional root lookup between the two namespaces.
///
/// Every Linux mount point is kept. When one Windows root is mounted in
/// several places, the reverse lookup uses the last one, so the two maps are
/// exact inverses only when no Windows root is mounted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountMapping {
    linux_to_windows: BTreeMap<String, String>,
    windows_to_linux: BTreeMap<String, String>,
}

impl MountMapping {
    /// Query `source` and build a mapping from its records
    pub fn resolve(source: &dyn MountSource) -> Result<Self> {
        let records = source.mounts()?;
        log::debug!("{} mount source returned {} record(s)", source.name(), records.len());
        let mapping = Self::from_records(records);
        if mapping.is_empty() {
            log::warn!("no bridged mounts found, nothing can be translated");
        }
        Ok(mapping)
    }

    /// Build a mapping from records in one pass; later records win
    pub fn from_records(records: impl IntoIterator<Item = MountRecord>) -> Self {
        let mut mapping = MountMapping::default();
        for record in records {
            mapping.insert(record.target, record.source);
        }
        mapping
    }

    fn insert(&mut self, linux_root: String, windows_root: String) {
        log::trace!("mapping {linux_root} <-> {windows_root}");

        let replaced = self
            .linux_to_windows
            .insert(linux_root.clone(), windows_root.clone());
        if let Some(old_windows) = replaced.filter(|old| *old != windows_root) {
            log::warn!("{linux_root} was mounted from {old_windows}, now {windows_root}");
            if self.windows_to_linux.get(&old_windows) == Some(&linux_root) {
                self.windows_to_linux.remove(&old_windows);
            }
        }

        // Every mount point stays reachable; only the reverse lookup has to pick one
        let replaced = self
            .windows_to_linux
            .insert(windows_root.clone(), linux_root.clone());
        if let Some(old_linux) = replaced.filter(|old| *old != linux_root) {
            log::warn!(
                "{windows_root} is mounted on both {old_linux} and {linux_root}; using {linux_root}"
            );
        }
    }

    /// Linux root -> Windows root
    pub fn linux_to_windows(&self) -> &BTreeMap<String, String> {
        &self.linux_to_windows
    }

    /// Windows root -> Linux root
    pub fn windows_to_linux(&self) -> &BTreeMap<String, String> {
        &self.windows_to_linux
    }

    /// Number of bridged mounts
    pub fn len(&self) -> usize {
        self.linux_to_windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.linux_to_windows.is_empty()
    }

    /// `(linux root, windows root)` pairs ordered by Linux root
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.linux_to_windows
            .iter()
            .map(|(l, w)| (l.as_str(), w.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WslPathError;
    use crate::translate::PathTranslator;

    fn records() -> Vec<MountRecord> {
        vec![
            MountRecord::new("/mnt/c", "C:"),
            MountRecord::new("/mnt/d", "D:"),
            MountRecord::new("/mnt/wsl/share", "\\\\server\\share"),
        ]
    }

    #[test]
    fn test_record_trims_trailing_separators() {
        let record = MountRecord::new("/mnt/c/", "C:\\");
        assert_eq!(record.target, "/mnt/c");
        assert_eq!(record.source, "C:");
    }

    #[test]
    fn test_record_keeps_bare_root() {
        let record = MountRecord::new("/", "\\");
        assert_eq!(record.target, "/");
        assert_eq!(record.source, "\\");
    }

    #[test]
    fn test_mapping_is_inverse() {
        let mapping = MountMapping::from_records(records());
        assert_eq!(mapping.len(), 3);
        for record in records() {
            assert_eq!(mapping.windows_to_linux()[&record.source], record.target);
            assert_eq!(mapping.linux_to_windows()[&record.target], record.source);
        }
    }

    #[test]
    fn test_later_record_replaces_both_directions() {
        let mapping = MountMapping::from_records(vec![
            MountRecord::new("/mnt/c", "C:"),
            MountRecord::new("/mnt/c", "E:"),
        ]);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.linux_to_windows()["/mnt/c"], "E:");
        assert!(!mapping.windows_to_linux().contains_key("C:"));
        assert_eq!(mapping.windows_to_linux().len(), 1);
    }

    #[test]
    fn test_same_source_remounted() {
        let mapping = MountMapping::from_records(vec![
            MountRecord::new("/mnt/c", "C:"),
            MountRecord::new("/c", "C:"),
        ]);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.windows_to_linux()["C:"], "/c");
        assert_eq!(mapping.linux_to_windows()["/mnt/c"], "C:");

        let translator = PathTranslator::new(mapping);
        assert_eq!(translator.to_windows("/mnt/c/x").unwrap(), "C:\\x");
        assert_eq!(translator.to_windows("/c/x").unwrap(), "C:\\x");
        assert_eq!(translator.to_linux("C:\\x").unwrap(), "/c/x");
    }

    #[test]
    fn test_empty_mapping() {
        let mapping = MountMapping::resolve(&StaticMounts::default()).unwrap();
        assert!(mapping.is_empty());
        assert_eq!(mapping.iter().count(), 0);
    }

    #[test]
    fn test_iter_sorted_by_linux_root() {
        let mapping = MountMapping::from_records(vec![
            MountRecord::new("/mnt/d", "D:"),
            MountRecord::new("/mnt/c", "C:"),
        ]);
        let pairs: Vec<_> = mapping.iter().collect();
        assert_eq!(pairs, vec![("/mnt/c", "C:"), ("/mnt/d", "D:")]);
    }

    #[test]
    fn test_resolve_from_static_source() {
        let mapping = MountMapping::resolve(&StaticMounts::new(records())).unwrap();
        assert_eq!(mapping.windows_to_linux()["D:"], "/mnt/d");
    }

    struct BrokenSource;

    impl MountSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        fn mounts(&self) -> Result<Vec<MountRecord>> {
            Err(WslPathError::query("broken", "not available"))
        }
    }

    #[test]
    fn test_resolve_propagates_query_error() {
        let err = MountMapping::resolve(&BrokenSource).unwrap_err();
        assert!(matches!(err, WslPathError::EnvironmentQuery { .. }));
    }
}
