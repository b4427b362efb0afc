//! Optimize command handler.

use anyhow::{Context, Result};
use bargeflow_lib::{optimize_design_and_operation, OptimizerConfig, Scenario};
use tracing::warn;

use bargeflow_cli::output::{render_optimization_text, OutputFormat};

use super::emit;

/// Command-line overrides of the optimiser grid and execution settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizeArgs {
    pub min_design_speed: Option<f64>,
    pub max_design_speed: Option<f64>,
    pub design_step: Option<f64>,
    pub workers: usize,
    pub sequential: bool,
    pub show_curve: bool,
}

impl OptimizeArgs {
    pub fn to_config(&self) -> OptimizerConfig {
        let defaults = OptimizerConfig::default();
        OptimizerConfig {
            min_design_speed: self.min_design_speed.unwrap_or(defaults.min_design_speed),
            max_design_speed: self.max_design_speed.unwrap_or(defaults.max_design_speed),
            design_step: self.design_step.unwrap_or(defaults.design_step),
            parallel: !self.sequential,
            workers: self.workers,
            ..defaults
        }
    }
}

pub fn handle_optimize(
    scenario: &Scenario,
    args: &OptimizeArgs,
    format: OutputFormat,
) -> Result<()> {
    let config = args.to_config();
    let result =
        optimize_design_and_operation(scenario, &config).context("optimisation failed")?;
    if !result.is_viable() {
        warn!("no viable design found");
    }
    emit(format, &result, |out, palette| {
        render_optimization_text(out, &result, args.show_curve, palette)
    })
}
