//! Template command handler: print the reference scenario.

use std::io::{self, Write};

use anyhow::{Context, Result};
use bargeflow_lib::Scenario;

use bargeflow_cli::output::write_json;

/// Print the reference scenario as JSON, ready to edit and pass back via
/// `--scenario`.
pub fn handle_template() -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_json(&mut stdout, &Scenario::reference()).context("failed to write template")?;
    stdout.flush().context("failed to flush output")
}
