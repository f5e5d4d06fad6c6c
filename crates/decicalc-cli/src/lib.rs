//! decicalc CLI library
//!
//! Argument parsing, configuration, logging and the subcommand handlers
//! behind the `decicalc` binary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
pub mod script;

pub use commands::{Cli, Commands, ConfigArgs, OutputFormat, PressArgs};
pub use config::{CliConfig, Verbosity};
pub use error::{CliError, CliResult};
