//! CLI configuration

use decicalc::config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::commands::Cli;
use crate::error::CliResult;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - every handled event
    Debug,
    /// Trace - everything, including ignored input
    Trace,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug | Self::Trace)
    }

    /// Default log filter directive for this level
    #[must_use]
    pub const fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Engine tunables
    pub engine: EngineConfig,
    /// Log destination; stderr when unset
    pub log_file: Option<PathBuf>,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and validates the configuration from parsed arguments
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let mut engine = EngineConfig::default();
        if let Some(scale) = cli.scale {
            engine = engine.with_scale(scale);
        }

        let config = Self::new()
            .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
            .with_engine(engine)
            .with_log_json(cli.log_json);
        let config = match &cli.log_file {
            Some(path) => config.with_log_file(path.clone()),
            None => config,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the engine configuration
    #[must_use]
    pub const fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set the log file
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Set JSON log output
    #[must_use]
    pub const fn with_log_json(mut self, json: bool) -> Self {
        self.log_json = json;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        self.engine.validate()?;
        Ok(())
    }
}
