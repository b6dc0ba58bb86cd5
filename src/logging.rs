//! Logging through `tracing` and `tracing-subscriber`.
//!
//! The terminal owns stdout while the storefront runs, so log output is only
//! installed when a log file is configured.
//!
//! # Log Levels
//!
//! - `warn`: catalog or config problems that fall back to something usable
//! - `info`: navigations issued, catalog loads
//! - `debug`: search synchronization transitions, page changes
//! - `trace`: events ignored by the synchronizer

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_target: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            with_target: true,
            log_file: None,
        }
    }
}

impl LogConfig {
    /// - 0: info
    /// - 1 (`-v`): debug
    /// - 2+ (`-vv`): trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    fn filter(&self) -> EnvFilter {
        let directive = format!("vitrina={}", self.level.as_str().to_lowercase());
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    }
}

/// Installs the global subscriber. Returns `false` when no log file is
/// configured and nothing was installed.
pub fn init_logging(config: &LogConfig) -> Result<bool> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(config.with_target)
        .with_writer(Arc::new(file));

    // A second init (tests, embedding) keeps the first subscriber.
    let installed = tracing_subscriber::registry()
        .with(config.filter())
        .with(layer)
        .try_init()
        .is_ok();
    Ok(installed)
}
