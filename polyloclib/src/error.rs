//! Error types for polyloclib

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a scan before it starts
#[derive(Error, Debug)]
pub enum PolylocError {
    /// Root path does not exist
    #[error("path does not exist: {0}")]
    RootNotFound(PathBuf),

    /// Root path is not a directory or regular file
    #[error("not a directory or regular file: {0}")]
    NotScannable(PathBuf),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What kind of filesystem object an error was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorTarget {
    File,
    Directory,
}

/// Broad classification of a recorded error.
///
/// Permission failures are distinguished so callers can down-weight them to
/// warnings instead of hard errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Permission,
    NotFound,
    Io,
}

impl ErrorKind {
    /// Classify a `std::io::Error` into a tagged kind.
    pub fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorKind::Permission,
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::Io,
        }
    }
}

/// A non-fatal error recorded during a scan.
///
/// One entry per file or directory that could not be processed. The scan
/// continues past these; they surface in the final report as a tally plus
/// the detailed list.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[error("error processing {path}: {message}", path = .path.display())]
pub struct ScanError {
    /// Path that failed
    pub path: PathBuf,
    /// Whether the path was a file or a directory
    pub target: ErrorTarget,
    /// Tagged error classification
    pub kind: ErrorKind,
    /// Human-readable cause
    pub message: String,
}

impl ScanError {
    /// Record a file-level failure.
    pub fn file(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            target: ErrorTarget::File,
            kind: ErrorKind::from_io(err),
            message: err.to_string(),
        }
    }

    /// Record a directory-level failure.
    pub fn directory(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            target: ErrorTarget::Directory,
            kind: ErrorKind::from_io(err),
            message: err.to_string(),
        }
    }

    /// True for permission-denied entries, which presentation layers may
    /// report as warnings rather than errors.
    pub fn is_permission(&self) -> bool {
        self.kind == ErrorKind::Permission
    }
}
