//! Fleet command handler.

use anyhow::{Context, Result};
use bargeflow_lib::{scale_to_demand, simulate_year, Scenario};

use bargeflow_cli::output::{render_fleet_text, FleetReport, OutputFormat};

use super::emit;
use super::simulate::PlanArgs;

pub fn handle_fleet(
    scenario: &Scenario,
    args: &PlanArgs,
    demand_t: f64,
    format: OutputFormat,
) -> Result<()> {
    let unit = simulate_year(scenario, &args.to_plan()).context("annual simulation failed")?;
    let fleet = scale_to_demand(&unit, demand_t).context("fleet scaling failed")?;
    let report = FleetReport {
        demand_t,
        unit: &unit,
        fleet,
    };
    emit(format, &report, |out, palette| {
        render_fleet_text(out, &report, palette)
    })
}
