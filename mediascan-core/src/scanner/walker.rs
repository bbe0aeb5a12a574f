use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::Receiver;
use jwalk::{Parallelism, WalkDirGeneric};
use tracing::debug;

use super::estimate::ProgressEstimator;
use super::progress::{EntryError, ProgressEvent, ScanMessage};
use super::result::ScanResult;
use crate::error::{MediaScanError, Result};
use crate::media::is_media_file;

/// Default maximum depth of a directory that is still listed (root = 0)
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Default number of counted files between progress events
pub const DEFAULT_PROGRESS_EVERY: u64 = 10;

/// Each entry carries the length of the listing it came from
type WalkState = ((), usize);

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Deepest directory that is listed; the root is depth 0.
    /// Files directly inside a directory at this depth are still counted.
    pub max_depth: usize,
    /// Follow symbolic links
    pub follow_symlinks: bool,
    /// Emit a progress event after this many counted files
    pub progress_every: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            follow_symlinks: false,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

/// Running totals, owned by a single `analyze` call
struct ScanState {
    file_count: u64,
    total_size: u64,
    media_files: Vec<PathBuf>,
    started: Instant,
}

impl ScanState {
    fn new() -> Self {
        Self {
            file_count: 0,
            total_size: 0,
            media_files: Vec::new(),
            started: Instant::now(),
        }
    }

    fn record_file(&mut self, path: PathBuf, size: u64) {
        self.file_count += 1;
        self.total_size = self.total_size.saturating_add(size);
        if is_media_file(&path) {
            self.media_files.push(path);
        }
    }

    fn into_result(self) -> ScanResult {
        ScanResult {
            total_files: self.file_count,
            total_size: self.total_size,
            media_files: self.media_files,
            elapsed_ms: self.started.elapsed().as_millis() as u64,
        }
    }
}

/// Folder analyzer
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan on a background thread
    ///
    /// Messages arrive on the receiver while the walk runs; the channel closes
    /// when the scan ends and the handle yields the result or the fatal error.
    pub fn scan(
        self,
        root_path: PathBuf,
    ) -> (Receiver<ScanMessage>, JoinHandle<Result<ScanResult>>) {
        let (tx, rx) = crossbeam_channel::unbounded();

        let handle = std::thread::spawn(move || {
            self.analyze(&root_path, |msg| {
                let _ = tx.send(msg);
            })
        });

        (rx, handle)
    }

    /// Walk `root_path` depth-first and return the totals
    ///
    /// `on_message` sees every side-channel message in order. A missing or
    /// non-directory root fails before any message is sent; entries that fail
    /// later are reported as [`ScanMessage::EntrySkipped`] and left out.
    pub fn analyze<F>(&self, root_path: &Path, mut on_message: F) -> Result<ScanResult>
    where
        F: FnMut(ScanMessage),
    {
        let root_path = validate_root(root_path)?;
        let mut state = ScanState::new();
        let mut estimator = ProgressEstimator::default();
        let progress_every = self.config.progress_every.max(1);

        debug!(
            root = %root_path.display(),
            max_depth = self.config.max_depth,
            follow_symlinks = self.config.follow_symlinks,
            "starting scan"
        );

        for entry_result in self.walker(&root_path) {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    on_message(ScanMessage::EntrySkipped(EntryError::from_walk(&err)));
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                // Root is already validated; directories past the bound are
                // yielded by the walker but never listed
                if entry.depth() > 0 && entry.depth() <= self.config.max_depth {
                    on_message(ScanMessage::EnteredDirectory { path: entry.path() });
                }
                if let Some(err) = &entry.read_children_error {
                    let error = EntryError::from_walk(err).or_path(entry.path());
                    on_message(ScanMessage::EntrySkipped(error));
                }
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            let metadata = match self.file_metadata(&path) {
                Ok(m) => m,
                Err(err) => {
                    on_message(ScanMessage::EntrySkipped(EntryError::from_io(path, &err)));
                    continue;
                }
            };

            state.record_file(path, metadata.len());

            if state.file_count % progress_every == 0 {
                let percent = estimator.interim(state.file_count, entry.client_state);
                on_message(ScanMessage::Progress(ProgressEvent {
                    percent,
                    files_processed: state.file_count,
                }));
            }
        }

        on_message(ScanMessage::Progress(ProgressEvent {
            percent: estimator.complete(),
            files_processed: state.file_count,
        }));

        let result = state.into_result();
        debug!(
            files = result.total_files,
            bytes = result.total_size,
            media = result.media_files.len(),
            elapsed_ms = result.elapsed_ms,
            "scan finished"
        );
        Ok(result)
    }

    /// Serial, name-sorted walker. Directories at `max_depth + 1` are yielded
    /// but not read, so files one level below the deepest listed directory
    /// are the deepest entries seen.
    fn walker(&self, root_path: &Path) -> WalkDirGeneric<WalkState> {
        WalkDirGeneric::<WalkState>::new(root_path)
            .skip_hidden(false)
            .follow_links(self.config.follow_symlinks)
            .sort(true)
            .parallelism(Parallelism::Serial)
            .max_depth(self.config.max_depth.saturating_add(1))
            .process_read_dir(|_depth, _path, _read_dir_state, children| {
                let listing_len = children.len();
                for child in children.iter_mut().flatten() {
                    child.client_state = listing_len;
                }
            })
    }

    fn file_metadata(&self, path: &Path) -> io::Result<Metadata> {
        if self.config.follow_symlinks {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        }
    }
}

/// Check the root once, before traversal, and make it absolute
fn validate_root(root_path: &Path) -> Result<PathBuf> {
    match fs::metadata(root_path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(MediaScanError::NotADirectory(root_path.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(MediaScanError::PathNotFound(root_path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    }

    Ok(root_path
        .canonicalize()
        .unwrap_or_else(|_| root_path.to_path_buf()))
}
