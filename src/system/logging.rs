//! Logging system initialization
//!
//! Sets up `tracing` from the `[logging]` config section: stdout, a plain
//! append-only file, or daily rotated files, in text or JSON format.

use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::errors::{Result, WebError};

const DEFAULT_LOG_FILE_NAME: &str = "teenyurl-web.log";

/// Initialize logging based on configuration
///
/// Call once at startup, after the configuration has been loaded. The
/// returned `WorkerGuard` must be kept alive for the lifetime of the
/// program so buffered log lines are flushed.
///
/// `RUST_LOG` takes precedence over `logging.level` when it is set.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let log_file = config.file.as_deref().filter(|f| !f.is_empty());
    let writer = build_writer(config, log_file)?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| WebError::logging(format!("Invalid log level '{}': {}", config.level, e)))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file.is_none());

    let result = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    result.map_err(|e| WebError::logging(format!("Failed to install subscriber: {}", e)))?;

    Ok(guard)
}

fn build_writer(
    config: &LoggingConfig,
    log_file: Option<&str>,
) -> Result<Box<dyn Write + Send + Sync>> {
    let Some(log_file) = log_file else {
        return Ok(Box::new(std::io::stdout()));
    };

    if config.enable_rotation {
        let path = Path::new(log_file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_FILE_NAME);

        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
            .map_err(|e| {
                WebError::logging(format!("Failed to create rolling log appender: {}", e))
            })?;
        Ok(Box::new(appender))
    } else {
        // 不轮转，追加写入
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .map_err(|e| {
                WebError::file_operation(format!("Failed to open log file {}: {}", log_file, e))
            })?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_file_writer_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("web.log");
        let config = LoggingConfig {
            file: Some(path.to_string_lossy().into_owned()),
            enable_rotation: false,
            ..LoggingConfig::default()
        };

        let mut writer = build_writer(&config, config.file.as_deref()).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("web.log");
        let config = LoggingConfig {
            file: Some(path.to_string_lossy().into_owned()),
            enable_rotation: false,
            ..LoggingConfig::default()
        };

        let err = build_writer(&config, config.file.as_deref()).err().unwrap();
        assert_eq!(err.code(), "E003");
    }
}
