//! File logging with tracing.
//!
//! The TUI owns the terminal, so every event goes to the configured log file.
//! `RUST_LOG` takes precedence over `[logging] level` when set.

use std::ffi::OsStr;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

const DEFAULT_LOG_FILE: &str = "chromatix.log";

/// Target the configured level applies to; dependencies log at `warn`.
const TARGET: &str = "chromatix";

/// Install the global subscriber writing to `config.file`.
///
/// The returned guard flushes pending lines when dropped; hold it until exit.
pub fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let (dir, file_name) = split_log_path(&config.file);
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("cannot create log directory {}: {e}", dir.display());
    }

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false);

    #[cfg(debug_assertions)]
    let file_layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        file_layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
    };

    if tracing_subscriber::registry()
        .with(build_filter(&config.level))
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("global subscriber already set");
    }

    guard
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("warn,{TARGET}={level}")))
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{TARGET}=info")))
}

/// Directory and file name of `path`; a bare directory gets the default name.
fn split_log_path(path: &Path) -> (&Path, &OsStr) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));
    (dir, file_name)
}
