use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{NormalizeError, Result};

const LOG_FILE_PREFIX: &str = "address_normalizer.log";

/// Daily-rolling appender under `dir`, creating the directory if needed.
pub fn build_file_appender(dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(dir).map_err(|e| {
        NormalizeError::Config(format!(
            "Failed to create log directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir)
        .map_err(|e| {
            NormalizeError::Config(format!(
                "Failed to open log file in '{}': {}",
                dir.display(),
                e
            ))
        })
}

/// Initializes console logging on stderr, plus daily-rolling JSON files when
/// `log_dir` is configured. Stdout is left for the normalized records.
///
/// The returned guard flushes the file writer on drop and must outlive all logging.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    // Respect RUST_LOG if set; otherwise the configured level for our crate
    let default_directive = format!(
        "address_normalizer={}",
        config.level.as_deref().unwrap_or("info")
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let file_appender = build_file_appender(dir)?;
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(fmt::layer().json().with_writer(non_blocking_writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}
