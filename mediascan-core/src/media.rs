//! Media classification by file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Image extensions counted as media, lowercase and without the dot
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

/// Video extensions counted as media, lowercase and without the dot
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm", "wmv", "flv"];

/// Broad kind of a recognised media file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Image, MediaKind::Video];

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Classify an extension (without the dot), ignoring ASCII case
pub fn classify_extension(ext: &str) -> Option<MediaKind> {
    if IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Classify a path by its extension
///
/// Dotfiles such as `.jpg` have no extension and are never media.
pub fn media_kind(path: &Path) -> Option<MediaKind> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(classify_extension)
}

pub fn is_media_file(path: &Path) -> bool {
    media_kind(path).is_some()
}
