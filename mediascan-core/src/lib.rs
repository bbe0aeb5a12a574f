pub mod error;
pub mod media;
pub mod scanner;
pub mod size;

pub use error::{MediaScanError, Result};
pub use media::{IMAGE_EXTENSIONS, MediaKind, VIDEO_EXTENSIONS, is_media_file, media_kind};
pub use scanner::{
    DEFAULT_MAX_DEPTH, DEFAULT_PROGRESS_EVERY, EntryError, EntryErrorKind, ProgressEvent,
    ScanConfig, ScanMessage, ScanResult, Scanner,
};
pub use size::{format_count, format_elapsed, format_size};
