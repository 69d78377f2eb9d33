//! Error types for faro.
//!
//! Two families: [ScanError] for whole-directory read failures (the caller
//! keeps the previous snapshot on screen and shows a message), and [OpError]
//! for mutating file operations (create/rename/copy/move/delete), where the
//! register source must stay intact so the user can retry.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A directory could not be scanned at all (unreadable, removed, or not a
/// directory). Per-entry metadata failures never produce this; the scanner
/// skips those entries and continues.
#[derive(Debug, Error)]
#[error("cannot read directory '{}': {source}", path.display())]
pub struct ScanError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl ScanError {
    pub fn new(path: PathBuf, source: io::Error) -> Self {
        Self { path, source }
    }

    #[inline]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// Failure of a mutating file operation.
#[derive(Debug, Error)]
pub enum OpError {
    /// The destination name is already taken. The operation is aborted
    /// before touching disk and the register slot stays populated.
    #[error("'{0}' already exists")]
    AlreadyExists(String),

    /// The source disappeared between selection and execution.
    #[error("'{0}' does not exist")]
    NotFound(String),

    /// An empty required field in a create/rename/paste prompt. Rejected
    /// before touching disk.
    #[error("name must not be empty")]
    EmptyName,

    /// The underlying syscall failed; reported verbatim.
    #[error(transparent)]
    Io(#[from] io::Error),
}
