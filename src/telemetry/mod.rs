//! Logging initialization.
//!
//! Sets up tracing-subscriber from the loaded [`Config`]: a compact stderr
//! layer plus a plain-text layer appending to `LOG_FILE_PATH`. The level
//! comes from `LOG_LEVEL` unless `RUST_LOG` is set.

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Guard that flushes the log file writer on drop.
///
/// Must be held for the lifetime of the application.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Build the level filter: `RUST_LOG` wins, then the configured level.
pub fn build_filter(log_level: &str) -> Result<tracing_subscriber::EnvFilter> {
    use tracing_subscriber::EnvFilter;

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(log_level)
        .map_err(|e| Error::Logging(format!("invalid log level '{log_level}': {e}")))
}

/// Open `path` for appending, creating its parent directory if needed.
pub fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::Logging(format!("log path {} has no file name", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| Error::Logging(format!("cannot open log file {}: {e}", path.display())))
}

/// Run `f` with a temporary stderr subscriber at `info`.
///
/// Covers the window before [`init_logging`] can run, since the level and
/// log file are only known once the configuration has loaded.
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

/// Initialize logging for the process.
///
/// # Errors
///
/// Returns an error if the level is invalid, the log file cannot be opened,
/// or a global subscriber was already installed.
pub fn init_logging(config: &Config) -> Result<LoggingGuard> {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let env_filter = build_filter(&config.log_level)?;
    let (file_writer, file_guard) =
        tracing_appender::non_blocking(file_appender(&config.log_file_path)?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|e| Error::Logging(format!("failed to init tracing subscriber: {e}")))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
