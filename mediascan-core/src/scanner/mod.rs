mod estimate;
mod lossy;
mod progress;
mod result;
mod walker;

pub use progress::{EntryError, EntryErrorKind, ProgressEvent, ScanMessage};
pub use result::ScanResult;
pub use walker::{DEFAULT_MAX_DEPTH, DEFAULT_PROGRESS_EVERY, ScanConfig, Scanner};
