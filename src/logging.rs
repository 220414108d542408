//! Console plus daily-rotated file logging via `tracing`.

use crate::error::ConfigError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "cats_api=info,tower_http=info";

/// Rotated files kept on disk.
pub const MAX_LOG_FILES: usize = 31;

/// Install the global subscriber: stdout plus `<log_dir>/service.<date>.log`, rotated at midnight.
/// Keep the returned guard alive for the life of the process or buffered file output is lost.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard, ConfigError> {
    std::fs::create_dir_all(log_dir).map_err(|e| ConfigError::Invalid {
        key: "LOG_DIR",
        reason: e.to_string(),
    })?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("service")
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)
        .map_err(|e| ConfigError::Logging(e.to_string()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let console_layer = fmt::layer().with_target(true).with_line_number(true);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;
    Ok(guard)
}
