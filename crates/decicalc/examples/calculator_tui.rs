//! Calculator TUI Example
//!
//! Run with: cargo run --example calculator_tui --features tui

use decicalc::tui::{self, CalculatorApp};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tui::run(CalculatorApp::new())?;
    Ok(())
}
