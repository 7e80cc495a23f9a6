//! File-based logging.
//!
//! The terminal belongs to the TUI, so `tracing` output goes to a daily-rotated
//! file under the configured log directory instead of stderr.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;
use crate::error::LoggingError;

const LOG_FILE_PREFIX: &str = "rockola";

/// Initialize the global subscriber.
///
/// Logs are written to `<directory>/rockola.YYYY-MM-DD.log`. `RUST_LOG` takes
/// precedence over `settings.filter`. The returned guard flushes the
/// non-blocking writer on drop and must be held until shutdown.
pub fn init_logging(settings: &LoggingSettings) -> Result<WorkerGuard, LoggingError> {
    let log_dir = settings.directory.as_path();
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
            path: log_dir.to_path_buf(),
            source,
        })?;
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.filter.as_str()));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    tracing::info!(dir = %log_dir.display(), "logging initialized");

    Ok(guard)
}
