//! Process-wide log sink
//!
//! Every run writes to the console and to its own timestamped file
//! (`menu_scraper_YYYYmmdd_HHMMSS.log`) under the configured log directory.
//! [`init_logging`] installs the global subscriber once at startup; the returned
//! [`LogGuard`] must be held until the run ends so buffered lines are flushed.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Keeps the background file writer alive; dropping it flushes the log file
pub struct LogGuard {
    log_file: PathBuf,
    _worker: WorkerGuard,
}

impl LogGuard {
    /// Path of the file this run is logging to
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

/// Builds the log file name for a run started at `now`
pub fn log_file_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!("menu_scraper_{}.log", now.format("%Y%m%d_%H%M%S"))
}

/// Chooses the level filter for the given verbosity
///
/// `RUST_LOG`, when set, takes precedence over the flags.
fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if quiet {
        return EnvFilter::new("error");
    }

    match verbose {
        0 => EnvFilter::new("menu_scraper=info,warn"),
        1 => EnvFilter::new("menu_scraper=debug,info"),
        2 => EnvFilter::new("menu_scraper=trace,debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Installs the global tracing subscriber with console and file output
///
/// # Arguments
///
/// * `log_dir` - Directory for the run's log file (created if missing)
/// * `verbose` - Verbosity count from the command line
/// * `quiet` - Only report errors
///
/// # Returns
///
/// * `Ok(LogGuard)` - Logging is active until the guard is dropped
/// * `Err(io::Error)` - The log directory could not be created
pub fn init_logging(log_dir: &Path, verbose: u8, quiet: bool) -> std::io::Result<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_name = log_file_name(chrono::Local::now());
    let file_appender = tracing_appender::rolling::never(log_dir, &file_name);
    let (file_writer, worker) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(build_filter(verbose, quiet));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_filter(build_filter(verbose, quiet));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    let log_file = log_dir.join(file_name);
    tracing::info!("Logging to {}", log_file.display());

    Ok(LogGuard {
        log_file,
        _worker: worker,
    })
}
