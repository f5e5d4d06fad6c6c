//! Log output setup
//!
//! `RUST_LOG` wins when set; otherwise the verbosity flags pick the level.

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error
    Stderr,
    /// The configured log file
    File,
    /// Nowhere; the terminal UI owns the screen
    Off,
}

impl LogTarget {
    /// Chooses a target; the terminal UI never logs to stderr
    #[must_use]
    pub fn select(config: &CliConfig, interactive: bool) -> Self {
        match (&config.log_file, interactive) {
            (Some(_), _) => Self::File,
            (None, true) => Self::Off,
            (None, false) => Self::Stderr,
        }
    }
}

/// Builds the level filter from `RUST_LOG` or the verbosity
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.verbosity.filter()))
}

/// Installs the global subscriber
pub fn init(config: &CliConfig, interactive: bool) -> CliResult<()> {
    let target = LogTarget::select(config, interactive);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(false);

    let result = match (target, config.log_file.as_ref()) {
        (LogTarget::Off, _) => return Ok(()),
        (LogTarget::File, Some(path)) => {
            let file = File::create(path)?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            if config.log_json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
        _ => {
            let builder = builder.with_writer(std::io::stderr);
            if config.log_json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
    };

    result.map_err(|e| CliError::logging(e.to_string()))
}
