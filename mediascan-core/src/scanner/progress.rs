use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

use super::lossy;

/// Message emitted on the side channel while a scan runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScanMessage {
    /// A subdirectory within the depth bound is about to be listed
    EnteredDirectory {
        #[serde(serialize_with = "lossy::path")]
        path: PathBuf,
    },
    /// Progress estimate
    Progress(ProgressEvent),
    /// An entry could not be read and was left out of the totals
    EntrySkipped(EntryError),
}

/// Snapshot of scan progress. `percent` stays within 0..=95 until the
/// traversal is done, then a single event reports 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub percent: u8,
    pub files_processed: u64,
}

impl ProgressEvent {
    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Progress: {}% - Processed {} files",
            self.percent, self.files_processed
        )
    }
}

/// Why an entry was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryErrorKind {
    PermissionDenied,
    NotFound,
    SymlinkLoop,
    Io,
}

impl From<io::ErrorKind> for EntryErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::PermissionDenied => EntryErrorKind::PermissionDenied,
            io::ErrorKind::NotFound => EntryErrorKind::NotFound,
            _ => EntryErrorKind::Io,
        }
    }
}

/// A file or directory that could not be read during traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryError {
    #[serde(serialize_with = "lossy::opt_path")]
    pub path: Option<PathBuf>,
    pub kind: EntryErrorKind,
    pub message: String,
}

impl EntryError {
    pub(crate) fn from_io(path: PathBuf, err: &io::Error) -> Self {
        Self {
            path: Some(path),
            kind: err.kind().into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn from_walk(err: &jwalk::Error) -> Self {
        let kind = if err.loop_ancestor().is_some() {
            EntryErrorKind::SymlinkLoop
        } else {
            err.io_error()
                .map(|e| e.kind().into())
                .unwrap_or(EntryErrorKind::Io)
        };

        Self {
            path: err.path().map(|p| p.to_path_buf()),
            kind,
            message: err.to_string(),
        }
    }

    /// Fill in `path` when the underlying error did not carry one
    pub(crate) fn or_path(mut self, path: PathBuf) -> Self {
        if self.path.is_none() {
            self.path = Some(path);
        }
        self
    }
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "Cannot access {}: {}", path.display(), self.message),
            None => write!(f, "Cannot access entry: {}", self.message),
        }
    }
}
