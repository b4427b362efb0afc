//! Convoy command handler.

use anyhow::Result;
use bargeflow_lib::Scenario;

use bargeflow_cli::output::{render_convoy_text, ConvoySummary, OutputFormat};

use super::emit;

pub fn handle_convoy(scenario: &Scenario, format: OutputFormat) -> Result<()> {
    let summary = ConvoySummary::from_scenario(scenario);
    emit(format, &summary, |out, palette| {
        render_convoy_text(out, &summary, palette)
    })
}
