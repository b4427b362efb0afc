// CLI subcommand handlers.
//
// Each module handles one subcommand; main.rs parses arguments, loads the
// scenario once and dispatches here.

pub mod convoy;
pub mod fleet;
pub mod optimize;
pub mod simulate;
pub mod template;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use bargeflow_lib::{RiverDepthProfile, Scenario};
use serde::Serialize;

use bargeflow_cli::output::{write_json, OutputFormat};
use bargeflow_cli::terminal::ColorPalette;

/// Load the scenario from `--scenario`, or the built-in reference, and
/// replace its depth profile with `--depths` when given.
pub fn load_scenario(scenario: Option<&Path>, depths: Option<&Path>) -> Result<Scenario> {
    let mut scenario = match scenario {
        Some(path) => Scenario::from_path(path)
            .with_context(|| format!("failed to load scenario from {}", path.display()))?,
        None => Scenario::reference(),
    };

    if let Some(path) = depths {
        scenario.depth_profile = RiverDepthProfile::from_path(path)
            .with_context(|| format!("failed to load depth profile from {}", path.display()))?;
    }

    scenario
        .validate()
        .context("scenario failed validation")?;
    Ok(scenario)
}

/// Render `value` to stdout as JSON, or with `render_text` otherwise.
pub fn emit<T, F>(format: OutputFormat, value: &T, render_text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&mut io::StdoutLock<'static>, ColorPalette) -> io::Result<()>,
{
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(&mut stdout, value),
        OutputFormat::Text => render_text(&mut stdout, ColorPalette::detect()),
    }
    .context("failed to write output")?;
    stdout.flush().context("failed to flush output")
}
