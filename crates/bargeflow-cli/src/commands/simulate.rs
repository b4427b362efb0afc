//! Simulate command handler.

use anyhow::{Context, Result};
use bargeflow_lib::{simulate_year, OperatingPlan, Scenario};
use tracing::info;

use bargeflow_cli::output::{render_annual_text, OutputFormat};

use super::emit;

/// Speed and engine options shared by `simulate` and `fleet`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanArgs {
    pub speed: Option<f64>,
    pub monthly_speeds: Option<Vec<f64>>,
    pub power: Option<f64>,
}

impl PlanArgs {
    pub fn to_plan(&self) -> OperatingPlan {
        let monthly_speeds = match (&self.monthly_speeds, self.speed) {
            (Some(speeds), _) => Some(speeds.clone()),
            (None, Some(speed)) => Some(vec![speed; bargeflow_lib::MONTHS]),
            (None, None) => None,
        };
        OperatingPlan {
            monthly_speeds,
            forced_power: self.power,
        }
    }
}

pub fn handle_simulate(scenario: &Scenario, args: &PlanArgs, format: OutputFormat) -> Result<()> {
    let plan = args.to_plan();
    let result = simulate_year(scenario, &plan).context("annual simulation failed")?;
    info!(
        unit_cost = result.unit_cost,
        cargo_t = result.total_cargo_t,
        "simulation complete"
    );
    emit(format, &result, |out, palette| {
        render_annual_text(out, &result, palette)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_speed_fills_every_month() {
        let plan = PlanArgs {
            speed: Some(5.5),
            ..PlanArgs::default()
        }
        .to_plan();
        assert_eq!(plan.monthly_speeds, Some(vec![5.5; 12]));
        assert_eq!(plan.forced_power, None);
    }

    #[test]
    fn no_speed_uses_cruise() {
        assert_eq!(PlanArgs::default().to_plan(), OperatingPlan::default());
    }
}
