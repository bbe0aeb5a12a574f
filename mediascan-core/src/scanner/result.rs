use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::lossy;
use crate::media::{MediaKind, media_kind};

/// Final report of a completed scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Regular files counted within the depth bound
    #[serde(rename = "totalFiles")]
    pub total_files: u64,
    /// Sum of the byte lengths of those files
    #[serde(rename = "totalSize")]
    pub total_size: u64,
    /// Absolute paths of media files, in traversal order
    #[serde(rename = "mediaFiles", serialize_with = "lossy::paths")]
    pub media_files: Vec<PathBuf>,
    /// Wall-clock duration of the scan in milliseconds
    #[serde(rename = "elapsedTime")]
    pub elapsed_ms: u64,
}

impl ScanResult {
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    pub fn media_count(&self, kind: MediaKind) -> usize {
        self.media_files
            .iter()
            .filter(|p| media_kind(p) == Some(kind))
            .count()
    }
}
