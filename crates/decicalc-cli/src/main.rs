//! decicalc: desk calculator with exact decimal arithmetic
//!
//! ## Usage
//!
//! ```bash
//! decicalc                        # Interactive terminal calculator
//! decicalc press "12+7="          # Print the display after a key script
//! decicalc press "5/0=" --trace   # Show the display after every key
//! decicalc config                 # Show the engine configuration
//! ```

use clap::Parser;
use decicalc_cli::{handlers, logging, Cli, CliConfig, CliResult, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_cli(&cli)?;

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    logging::init(&config, interactive)?;

    match cli.command {
        None | Some(Commands::Tui) => handlers::run_tui(&config),
        Some(Commands::Press(args)) => {
            print!("{}", handlers::run_press(&config, &args)?);
            Ok(())
        }
        Some(Commands::Config(args)) => {
            print!("{}", handlers::run_config(&config, &args)?);
            Ok(())
        }
    }
}
