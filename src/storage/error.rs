//! Storage and snapshot errors

use std::path::PathBuf;
use thiserror::Error;

use super::SessionId;

/// Failure to read or write a stored snapshot
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot at {path} could not be decoded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A decoded snapshot that cannot be turned back into a session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("snapshot was written for {found} steps")]
    StepCountMismatch { found: usize },
    #[error("stored current step {0} is out of range")]
    StepOutOfRange(usize),
    #[error("snapshot belongs to session {found}, expected {expected}")]
    SessionMismatch { expected: SessionId, found: SessionId },
}
