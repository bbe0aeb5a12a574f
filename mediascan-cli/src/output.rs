use std::io::Write;

use clap::ValueEnum;
use color_eyre::Result;
use mediascan_core::{MediaScanError, ScanMessage, ScanResult};
use serde::Serialize;
use tracing::{info, warn};

/// How the message stream is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    /// `Progress:` lines, diagnostics on stderr, one JSON result line
    Human,
    /// One tagged JSON object per line for every message
    Json,
}

/// Terminal lines of the json format
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum Terminal<'a> {
    Result(&'a ScanResult),
    Failed { message: String },
}

/// Writes scan messages and the final outcome in the chosen format
pub struct Output<W: Write> {
    out: W,
    format: MessageFormat,
}

impl<W: Write> Output<W> {
    pub fn new(out: W, format: MessageFormat) -> Self {
        Self { out, format }
    }

    pub fn message(&mut self, msg: &ScanMessage) -> Result<()> {
        match self.format {
            MessageFormat::Human => match msg {
                ScanMessage::Progress(progress) => writeln!(self.out, "{progress}")?,
                ScanMessage::EnteredDirectory { path } => {
                    info!("Analyzing subfolder: {}", path.display());
                }
                ScanMessage::EntrySkipped(error) => warn!("{error}"),
            },
            MessageFormat::Json => self.json_line(msg)?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Exactly one line, after every message
    pub fn result(&mut self, result: &ScanResult) -> Result<()> {
        match self.format {
            MessageFormat::Human => self.json_line(result)?,
            MessageFormat::Json => self.json_line(&Terminal::Result(result))?,
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn failure(&mut self, error: &MediaScanError) -> Result<()> {
        eprintln!("Error: {error}");
        if self.format == MessageFormat::Json {
            self.json_line(&Terminal::Failed {
                message: error.to_string(),
            })?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn json_line<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediascan_core::{EntryError, EntryErrorKind, ProgressEvent};
    use std::path::PathBuf;

    fn result() -> ScanResult {
        ScanResult {
            total_files: 3,
            total_size: 60,
            media_files: vec![PathBuf::from("/r/b.jpg"), PathBuf::from("/r/sub/c.mp4")],
            elapsed_ms: 5,
        }
    }

    fn lines(buf: Vec<u8>) -> Vec<String> {
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_human_stream() {
        let mut output = Output::new(Vec::new(), MessageFormat::Human);
        output
            .message(&ScanMessage::EnteredDirectory {
                path: PathBuf::from("/r/sub"),
            })
            .unwrap();
        output
            .message(&ScanMessage::Progress(ProgressEvent {
                percent: 100,
                files_processed: 3,
            }))
            .unwrap();
        output.result(&result()).unwrap();

        let lines = lines(output.into_inner());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Progress: 100% - Processed 3 files");

        let parsed: ScanResult = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(parsed, result());
    }

    #[test]
    fn test_json_stream() {
        let mut output = Output::new(Vec::new(), MessageFormat::Json);
        output
            .message(&ScanMessage::EntrySkipped(EntryError {
                path: Some(PathBuf::from("/r/locked")),
                kind: EntryErrorKind::PermissionDenied,
                message: "Permission denied".to_string(),
            }))
            .unwrap();
        output.result(&result()).unwrap();

        let lines = lines(output.into_inner());
        assert_eq!(lines.len(), 2);

        let skipped: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(skipped["type"], "entrySkipped");
        assert_eq!(skipped["kind"], "permissionDenied");
        assert_eq!(skipped["path"], "/r/locked");

        let done: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(done["type"], "result");
        assert_eq!(done["totalFiles"], 3);
        assert_eq!(done["elapsedTime"], 5);
    }

    #[test]
    fn test_failure_writes_no_result() {
        let error = MediaScanError::PathNotFound(PathBuf::from("/missing"));

        let mut output = Output::new(Vec::new(), MessageFormat::Human);
        output.failure(&error).unwrap();
        assert!(output.into_inner().is_empty());

        let mut output = Output::new(Vec::new(), MessageFormat::Json);
        output.failure(&error).unwrap();
        let lines = lines(output.into_inner());
        assert_eq!(lines.len(), 1);
        let failed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(failed["type"], "failed");
        assert_eq!(failed["message"], "Path does not exist: /missing");
    }
}
