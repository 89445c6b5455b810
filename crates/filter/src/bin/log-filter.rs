//! log-filter: stream filter over JSON-lines log records.
//!
//! Reads one `LogRecord` JSON object per line from stdin and writes the
//! records the filter leaves alone (Neutral) to stdout. Suppressed records
//! are dropped. The rule document is hot-reloaded while the stream runs.

use std::io::{self, BufRead, LineWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use log_filter::service::DEFAULT_CONFIG_FILE;
use log_filter::{Decision, FilterService, LogRecord};

// ── CLI ─────────────────────────────────────────────────────────────

/// Suppress log records according to a hot-reloaded rule document.
#[derive(Parser, Debug)]
#[command(name = "log-filter", version, about)]
struct Cli {
    /// Path to the filter document (JSON or YAML).
    #[arg(long, env = "LOG_FILTER_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

/// Counters reported when the input ends.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    passed: u64,
    suppressed: u64,
    malformed: u64,
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut service = FilterService::start(&cli.config);

    let summary = filter_stream(io::stdin().lock(), io::stdout().lock(), |record| {
        service.decide(record)
    })?;

    service.shutdown();
    info!(
        passed = summary.passed,
        suppressed = summary.suppressed,
        malformed = summary.malformed,
        "log-filter exited cleanly"
    );
    Ok(())
}

// ── Stream ──────────────────────────────────────────────────────────

/// Copy every Neutral record from `input` to `out`, one JSON object per line.
///
/// Output is line-buffered so passed records leave as soon as they are
/// decided. Lines that are not UTF-8 or not a record are counted and skipped.
fn filter_stream<R, W, F>(mut input: R, out: W, decide: F) -> io::Result<Summary>
where
    R: BufRead,
    W: Write,
    F: Fn(&LogRecord) -> Decision,
{
    let mut out = LineWriter::new(out);
    let mut summary = Summary::default();
    let mut buf = Vec::new();
    let mut number = 0usize;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!(line = number, error = %e, "skipping record that is not valid UTF-8");
                summary.malformed += 1;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        let record: LogRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = number, error = %e, "skipping malformed record");
                summary.malformed += 1;
                continue;
            }
        };

        match decide(&record) {
            Decision::Neutral => {
                serde_json::to_writer(&mut out, &record)?;
                out.write_all(b"\n")?;
                summary.passed += 1;
            }
            Decision::Suppress => summary.suppressed += 1,
        }
    }
    out.flush()?;
    Ok(summary)
}
