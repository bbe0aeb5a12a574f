use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a scan before any result is produced
///
/// Problems with individual entries met during traversal are not errors of
/// this kind; they are reported as [`crate::EntryError`] and skipped.
#[derive(Error, Debug)]
pub enum MediaScanError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MediaScanError>;
