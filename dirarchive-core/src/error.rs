use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Invalid scan request: {reason}")]
    InvalidRequest { reason: String },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Traversal failed at {}: {message}", .path.display())]
    Traversal { path: PathBuf, message: String },

    #[error("Record sink is closed")]
    ClosedSink,

    #[error("Scan was cancelled")]
    Cancelled,

    #[error("Scan worker panicked: {message}")]
    WorkerPanicked { message: String },
}

impl ArchiveError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a jwalk error that the counting pass does not tolerate.
    pub(crate) fn traversal(fallback: &Path, err: &jwalk::Error) -> Self {
        Self::Traversal {
            path: err.path().unwrap_or(fallback).to_path_buf(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

/// A node or subtree the walker could not read. Recorded, never propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error accessing path: {} - {message}", .path.display())]
pub struct NodeAccessError {
    pub path: PathBuf,
    pub message: String,
}

impl NodeAccessError {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn from_walk(fallback: &Path, err: &jwalk::Error) -> Self {
        Self::new(err.path().unwrap_or(fallback), err.to_string())
    }
}
