//! Process log setup for the bridge.
//!
//! The library only emits `tracing` events. A binary embedding the bridge
//! calls [`init`] once at startup to route them to stderr, or to a rolling
//! file when the `file_log` section enables it:
//!
//! ```rust,no_run
//! use map2xml::config::BridgeConfig;
//!
//! let config = BridgeConfig::load("bridge.json").unwrap();
//! // Keep the guard alive for the whole process or buffered lines are lost.
//! let _guard = map2xml::logging::init(&config).unwrap();
//! ```

use crate::config::{BridgeConfig, FileLogOptions};
use crate::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Builds a non-blocking writer over a daily rolling log file.
///
/// Returns `None` when file logging is disabled. The log directory is
/// created first.
///
/// # Errors
///
/// [`Error::Config`] when the directory cannot be created or the file cannot be opened.
pub fn file_writer(options: &FileLogOptions) -> Result<Option<(NonBlocking, WorkerGuard)>> {
    if !options.enable {
        return Ok(None);
    }

    let directory = Path::new(&options.directory);
    fs::create_dir_all(directory).map_err(|e| {
        Error::config(format!(
            "can't create log directory {}: {}",
            options.directory, e
        ))
    })?;

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(options.filename.as_str());
    if let Some(files) = options.retained_files() {
        builder = builder.max_log_files(files);
    }
    let appender = builder
        .build(directory)
        .map_err(|e| Error::config(format!("can't open log file: {}", e)))?;

    Ok(Some(tracing_appender::non_blocking(appender)))
}

/// Installs the global subscriber for the bridge process.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when the
/// configuration's `debug` flag is set and `info` when it is not. The
/// returned guard flushes the log file when dropped.
///
/// # Errors
///
/// [`Error::Config`] when the log file cannot be set up or a global
/// subscriber is already installed.
pub fn init(config: &BridgeConfig) -> Result<Option<WorkerGuard>> {
    let level = if config.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    let guard = match file_writer(&config.file_log)? {
        Some((writer, guard)) => {
            subscriber
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(Error::config)?;
            Some(guard)
        }
        None => {
            subscriber.try_init().map_err(Error::config)?;
            None
        }
    };

    info!(
        file_log = config.file_log.enable,
        directory = %config.file_log.directory,
        "logging initialized"
    );
    Ok(guard)
}
