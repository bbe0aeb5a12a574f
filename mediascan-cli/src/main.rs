mod output;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use mediascan_core::{
    DEFAULT_MAX_DEPTH, DEFAULT_PROGRESS_EVERY, MediaKind, ScanConfig, ScanResult, Scanner,
    format_count, format_elapsed, format_size,
};
use tracing_subscriber::EnvFilter;

use output::{MessageFormat, Output};

/// mediascan - folder analysis worker
#[derive(Parser, Debug)]
#[command(name = "mediascan")]
#[command(about = "Count files, bytes and media files in a folder, streaming progress and a JSON result")]
#[command(version)]
struct Args {
    /// Folder to analyze
    path: PathBuf,

    /// Deepest directory level that is still listed (the folder itself is 0)
    #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Follow symbolic links
    #[arg(short, long)]
    follow_symlinks: bool,

    /// Emit a progress message every N files
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY, value_parser = clap::value_parser!(u64).range(1..))]
    progress_every: u64,

    /// Format of the message stream on stdout
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    message_format: MessageFormat,

    /// Print a human-readable summary to stderr after the result
    #[arg(short, long)]
    summary: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.message_format);

    let scan_config = ScanConfig {
        max_depth: args.max_depth,
        follow_symlinks: args.follow_symlinks,
        progress_every: args.progress_every,
    };

    let scanner = Scanner::new(scan_config);
    let (rx, handle) = scanner.scan(args.path.clone());

    let stdout = io::stdout();
    let mut output = Output::new(stdout.lock(), args.message_format);

    for msg in rx {
        output.message(&msg)?;
    }

    let outcome = handle
        .join()
        .map_err(|_| eyre!("scanner thread panicked"))?;

    match outcome {
        Ok(result) => {
            output.result(&result)?;
            if args.summary {
                print_summary(&result);
            }
            Ok(())
        }
        Err(err) => {
            output.failure(&err)?;
            std::process::exit(1);
        }
    }
}

/// Diagnostics go to stderr so stdout carries only the message stream
fn init_tracing(format: MessageFormat) {
    let default_filter = match format {
        MessageFormat::Human => "info",
        MessageFormat::Json => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_summary(result: &ScanResult) {
    eprintln!("{}", summary_line(result));
}

fn summary_line(result: &ScanResult) -> String {
    let per_kind: Vec<String> = MediaKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "{} {}",
                format_count(result.media_count(*kind) as u64),
                kind.label()
            )
        })
        .collect();

    format!(
        "{} files, {} total, {} media ({}) in {}",
        format_count(result.total_files),
        format_size(result.total_size),
        format_count(result.media_files.len() as u64),
        per_kind.join(", "),
        format_elapsed(result.elapsed()),
    )
}
