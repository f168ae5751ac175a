//! Error taxonomy for mount resolution and path translation.
//!
//! Every failure is fatal to the single translation request; nothing here is
//! retried.

use thiserror::Error;

/// Errors produced while resolving mounts or translating a path
#[derive(Debug, Error)]
pub enum WslPathError {
    /// The mount query program could not be run or its output was unusable
    #[error("mount query `{program}` failed: {reason}")]
    EnvironmentQuery { program: String, reason: String },

    /// No mounted root is a separator-bounded prefix of the path
    #[error("no root found for {path}")]
    NoRootFound { path: String },

    /// More than one mounted root matches the path
    #[error("multiple roots found for {path}: {}", roots.join(", "))]
    AmbiguousRoot { path: String, roots: Vec<String> },

    /// Windows path without a separator right after its drive root
    #[error("cannot convert relative Windows path {path}")]
    RelativePath { path: String },

    /// The path syntax names neither namespace
    #[error("could not guess conversion direction for \"{path}\"")]
    AmbiguousPath { path: String },
}

impl WslPathError {
    pub(crate) fn query(program: &str, reason: impl Into<String>) -> Self {
        WslPathError::EnvironmentQuery {
            program: program.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WslPathError>;
