//! Error conditions raised while scanning.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conditions that can occur while scanning a repository.
///
/// Only `DiscoveryFailure` terminates a run. The analyzer absorbs the other
/// variants and reports them as diagnostics.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot discover source files under {}: {source}", .path.display())]
    DiscoveryFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read {}: {source}", .path.display())]
    FileReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("body of {name:?} opened on line {line} is never closed")]
    UnterminatedBody { name: String, line: usize },
    #[error("parameter {segment:?} of {name:?} on line {line} has no isolable name")]
    MalformedParameter {
        name: String,
        segment: String,
        line: usize,
    },
}

impl ScanError {
    /// Build a discovery failure from a directory-walk error.
    pub(crate) fn from_walk(root: &Path, err: walkdir::Error) -> Self {
        let message = err.to_string();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message));
        ScanError::DiscoveryFailure {
            path: root.to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ScanError::DiscoveryFailure { .. } => DiagnosticKind::DiscoveryFailure,
            ScanError::FileReadFailure { .. } => DiagnosticKind::FileReadFailure,
            ScanError::UnterminatedBody { .. } => DiagnosticKind::UnterminatedBody,
            ScanError::MalformedParameter { .. } => DiagnosticKind::MalformedParameter,
        }
    }

    /// Line the condition refers to (1-indexed), or 0 for whole-file conditions.
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnterminatedBody { line, .. } => *line,
            ScanError::MalformedParameter { line, .. } => *line,
            _ => 0,
        }
    }

    /// Whether this condition ends the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScanError::DiscoveryFailure { .. })
    }
}

/// Serializable classification of a `ScanError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    DiscoveryFailure,
    FileReadFailure,
    UnterminatedBody,
    MalformedParameter,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::DiscoveryFailure => "discovery_failure",
            DiagnosticKind::FileReadFailure => "file_read_failure",
            DiagnosticKind::UnterminatedBody => "unterminated_body",
            DiagnosticKind::MalformedParameter => "malformed_parameter",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
