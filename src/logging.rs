//! File-backed `tracing` setup.
//!
//! The walkthrough shares the terminal with its renderer, so log output only ever goes to a
//! file. With no `WALKTHROUGH_LOG` path configured nothing is installed and every `tracing`
//! call in the crate is a no-op.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    OpenLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid log filter {filter:?}: {message}")]
    InvalidFilter { filter: String, message: String },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Installs a global fmt subscriber writing to `config.log_path`.
///
/// Returns `Ok(false)` when logging is not configured.
pub fn init_file_logging(config: &EnvConfig) -> Result<bool, LoggingError> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(false);
    };

    let filter = build_filter(config.log_filter.as_deref())?;
    let path = PathBuf::from(path);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::OpenLog {
            path: path.clone(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    tracing::debug!(path = %path.display(), "file logging installed");
    Ok(true)
}

fn build_filter(filter: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let filter = filter.unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(filter).map_err(|err| LoggingError::InvalidFilter {
        filter: filter.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{build_filter, init_file_logging, LoggingError};
    use crate::config::EnvConfig;

    #[test]
    fn unconfigured_logging_installs_nothing() {
        let config = EnvConfig::default();
        assert!(!init_file_logging(&config).expect("no-op init"));
    }

    #[test]
    fn filter_defaults_and_parses_directives() {
        assert!(build_filter(None).is_ok());
        assert!(build_filter(Some("mise_walkthrough=trace,warn")).is_ok());
    }

    #[test]
    fn invalid_filter_is_reported() {
        let err = build_filter(Some("mise_walkthrough=loud")).expect_err("bad level");
        assert!(matches!(err, LoggingError::InvalidFilter { .. }));
    }

    #[test]
    fn unopenable_log_path_is_reported() {
        let config = EnvConfig {
            log_path: Some("/nonexistent-dir/walkthrough/out.log".to_string()),
            ..EnvConfig::default()
        };
        let err = init_file_logging(&config).expect_err("missing directory");
        assert!(matches!(err, LoggingError::OpenLog { .. }));
    }
}
