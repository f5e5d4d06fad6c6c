//! Subcommand handlers
//!
//! Each handler returns the text to print so it can be tested without
//! capturing stdout.

use decicalc::core::{DisplayUpdate, Engine};
use decicalc::keymap::KeyMap;
use decicalc::tui::{self, CalculatorApp};
use serde::Serialize;
use tracing::info;

use crate::commands::{ConfigArgs, OutputFormat, PressArgs};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::script::{self, Keystroke};

/// Display after one key of a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Key in script syntax
    pub key: String,
    /// Display text after the key
    pub display: String,
    /// Error raised by the key, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of running a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PressReport {
    /// Final display text
    pub display: String,
    /// Errors in the order they were raised
    pub errors: Vec<String>,
    /// Per-key trace, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

/// Feeds compiled keystrokes to a fresh engine
#[must_use]
pub fn run_script(config: &CliConfig, strokes: &[Keystroke], trace: bool) -> PressReport {
    let mut engine = Engine::with_config(config.engine);
    let mut errors = Vec::new();
    let mut steps = trace.then(Vec::new);

    for stroke in strokes {
        let error = match engine.handle(stroke.event) {
            DisplayUpdate::Text(_) => None,
            DisplayUpdate::Error(err) => Some(err.to_string()),
        };
        if let Some(message) = &error {
            errors.push(message.clone());
        }
        if let Some(steps) = steps.as_mut() {
            steps.push(Step {
                key: script::key_name(stroke.key),
                display: engine.current_display().to_string(),
                error,
            });
        }
    }

    PressReport {
        display: engine.current_display().to_string(),
        errors,
        steps,
    }
}

/// Renders a report as text
///
/// Without a trace, error lines come first and the final display last. With
/// a trace, each key gets a `key<TAB>display` line.
#[must_use]
pub fn format_report(report: &PressReport) -> String {
    let mut out = String::new();
    match &report.steps {
        Some(steps) => {
            for step in steps {
                match &step.error {
                    Some(message) => out.push_str(&format!("{}\tError: {message}\n", step.key)),
                    None => out.push_str(&format!("{}\t{}\n", step.key, step.display)),
                }
            }
        }
        None => {
            for message in &report.errors {
                out.push_str(&format!("Error: {message}\n"));
            }
            out.push_str(&report.display);
            out.push('\n');
        }
    }
    out
}

/// `press`: run a key script and render the outcome
pub fn run_press(config: &CliConfig, args: &PressArgs) -> CliResult<String> {
    let strokes = script::compile(&args.keys, &KeyMap::new())?;
    info!(keys = strokes.len(), trace = args.trace, "running key script");
    let report = run_script(config, &strokes, args.trace);

    match args.format {
        OutputFormat::Text => Ok(format_report(&report)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&report)?)),
    }
}

/// `config`: show the effective engine configuration as JSON
pub fn run_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<String> {
    let json = if args.compact {
        serde_json::to_string(&config.engine)?
    } else {
        serde_json::to_string_pretty(&config.engine)?
    };
    Ok(format!("{json}\n"))
}

/// `tui`: run the interactive calculator until the user quits
pub fn run_tui(config: &CliConfig) -> CliResult<()> {
    info!(scale = config.engine.scale, "starting terminal UI");
    tui::run(CalculatorApp::with_config(config.engine))?;
    Ok(())
}
