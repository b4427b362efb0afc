//! Joint design and operation optimisation.
//!
//! The outer loop sweeps design speeds; each one fixes the installed power
//! and therefore the fixed annual cost. For every design, the inner loop
//! chooses one operating speed per month by coordinate descent on the
//! yearly cost per tonne. The design with the lowest converged objective
//! wins, ties going to the slowest design.
//!
//! Designs are independent and are evaluated in parallel with Rayon; the
//! results are reduced in design-speed order so the outcome does not depend
//! on scheduling.

pub mod descent;
pub mod options;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::parallel::WorkerPool;
use crate::params::Scenario;
use crate::simulation::{
    per_ton, ConvoyDesign, MonthlyResult, MonthlyTotals, OperatingPoint, POWER_TOLERANCE,
};

pub use descent::{
    coordinate_descent, indicative_month_cost, isolated_month_choice, objective, DescentOutcome,
    DescentState, OptionValue,
};
pub use options::FeasibleOptions;

/// Search grids and execution settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Slowest design speed tried (knots).
    pub min_design_speed: f64,
    /// Fastest design speed tried, inclusive (knots).
    pub max_design_speed: f64,
    pub design_step: f64,
    /// Slowest operating speed offered in any month (knots).
    pub min_operating_speed: f64,
    /// Operating speeds run up to, not including, design speed plus this margin.
    pub operating_headroom: f64,
    pub operating_step: f64,
    /// Relative slack on the installed power.
    pub power_tolerance: f64,
    /// Evaluate designs on the Rayon pool.
    pub parallel: bool,
    /// Dedicated worker threads; 0 uses the global pool.
    pub workers: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            min_design_speed: 4.0,
            max_design_speed: 10.0,
            design_step: 0.1,
            min_operating_speed: 3.0,
            operating_headroom: 2.0,
            operating_step: 0.1,
            power_tolerance: POWER_TOLERANCE,
            parallel: true,
            workers: 0,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("min_design_speed", self.min_design_speed),
            ("max_design_speed", self.max_design_speed),
            ("design_step", self.design_step),
            ("min_operating_speed", self.min_operating_speed),
            ("operating_step", self.operating_step),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid(
                    field,
                    format!("must be a finite positive number, got {value}"),
                ));
            }
        }
        if self.min_design_speed > self.max_design_speed {
            return Err(Error::invalid(
                "min_design_speed",
                format!(
                    "must not exceed max_design_speed ({} > {})",
                    self.min_design_speed, self.max_design_speed
                ),
            ));
        }
        if !self.operating_headroom.is_finite() || self.operating_headroom < 0.0 {
            return Err(Error::invalid(
                "operating_headroom",
                format!("must be finite and non-negative, got {}", self.operating_headroom),
            ));
        }
        if !self.power_tolerance.is_finite() || self.power_tolerance < 0.0 {
            return Err(Error::invalid(
                "power_tolerance",
                format!("must be finite and non-negative, got {}", self.power_tolerance),
            ));
        }
        Ok(())
    }

    /// Design speeds from min to max inclusive.
    ///
    /// # Examples
    /// ```
    /// use bargeflow_lib::OptimizerConfig;
    ///
    /// let speeds = OptimizerConfig::default().design_speeds();
    /// assert_eq!(speeds.len(), 61);
    /// assert_eq!(speeds[0], 4.0);
    /// assert_eq!(speeds[60], 10.0);
    /// ```
    pub fn design_speeds(&self) -> Vec<f64> {
        let span = (self.max_design_speed - self.min_design_speed) / self.design_step;
        let count = (span + 1e-9).floor() as usize + 1;
        grid(self.min_design_speed, self.design_step, count)
    }

    /// Operating speeds offered to a design: from the floor up to, not
    /// including, `design_speed + headroom`.
    pub fn operating_speeds(&self, design_speed: f64) -> Vec<f64> {
        let stop = design_speed + self.operating_headroom;
        if stop <= self.min_operating_speed {
            return Vec::new();
        }
        let span = (stop - self.min_operating_speed) / self.operating_step;
        let count = (span - 1e-9).ceil().max(0.0) as usize;
        grid(self.min_operating_speed, self.operating_step, count)
    }
}

/// `count` evenly spaced values, each computed from its index so rounding
/// errors do not accumulate.
fn grid(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|index| round_speed(start + index as f64 * step))
        .collect()
}

fn round_speed(speed: f64) -> f64 {
    (speed * 1e9).round() / 1e9
}

/// The winning design and how it is operated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignCandidate {
    pub design_speed_knots: f64,
    pub installed_power_hp: f64,
    pub investment: f64,
    pub fixed_annual_cost: f64,
    /// Chosen draft and speed of each month.
    pub operating_points: Vec<OperatingPoint>,
    /// Yearly cost per tonne.
    pub objective: f64,
    pub total_annual_cost: f64,
    pub total_cargo_t: f64,
    pub total_emissions_t: f64,
    pub carbon_intensity_kg_per_t: f64,
    pub sweeps: u32,
}

/// One feasible design on the trade-off curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DesignSpeedPoint {
    pub design_speed_knots: f64,
    pub installed_power_hp: f64,
    pub objective: f64,
    pub sweeps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    /// `None` when no design speed is feasible.
    pub best_design: Option<DesignCandidate>,
    /// The winner's twelve months; empty without a winner.
    pub monthly_table: Vec<MonthlyResult>,
    /// Converged objective of every feasible design, by design speed.
    pub design_speed_curve: Vec<DesignSpeedPoint>,
    pub infeasible_design_speeds: Vec<f64>,
}

impl OptimizationResult {
    pub fn is_viable(&self) -> bool {
        self.best_design.is_some()
    }
}

struct EvaluatedDesign {
    candidate: DesignCandidate,
    months: Vec<MonthlyResult>,
}

enum DesignOutcome {
    Feasible(Box<EvaluatedDesign>),
    Infeasible(f64),
}

fn evaluate_design(
    scenario: &Scenario,
    config: &OptimizerConfig,
    design_speed: f64,
) -> DesignOutcome {
    let Some(design) = ConvoyDesign::sized_for(scenario, design_speed) else {
        debug!(design_speed, "propulsion undefined at worst-case draft");
        return DesignOutcome::Infeasible(design_speed);
    };

    let speeds = config.operating_speeds(design_speed);
    let Some(options) = FeasibleOptions::build(scenario, &design, &speeds, config.power_tolerance)
    else {
        return DesignOutcome::Infeasible(design_speed);
    };

    let fixed_annual_cost = design.fixed_annual_cost();
    let Some(outcome) = coordinate_descent(fixed_annual_cost, &options.values()) else {
        return DesignOutcome::Infeasible(design_speed);
    };

    let months = options.select(&outcome.indices);
    let totals: MonthlyTotals = months.iter().collect();
    debug!(
        design_speed,
        installed_power_hp = design.installed_power_hp,
        options = options.option_count(),
        sweeps = outcome.sweeps,
        objective = outcome.objective,
        "design converged"
    );

    DesignOutcome::Feasible(Box::new(EvaluatedDesign {
        candidate: DesignCandidate {
            design_speed_knots: design_speed,
            installed_power_hp: design.installed_power_hp,
            investment: design.capex.total,
            fixed_annual_cost,
            operating_points: months.iter().map(MonthlyResult::operating_point).collect(),
            objective: outcome.objective,
            total_annual_cost: fixed_annual_cost + totals.variable_cost,
            total_cargo_t: totals.cargo_t,
            total_emissions_t: totals.emissions_t,
            carbon_intensity_kg_per_t: per_ton(totals.emissions_t * 1000.0, totals.cargo_t),
            sweeps: outcome.sweeps,
        },
        months,
    }))
}

/// Find the design speed and monthly operating speeds with the lowest
/// yearly cost per tonne.
///
/// Infeasible designs are skipped and listed; a run where every design is
/// infeasible returns `best_design: None` with an empty monthly table.
///
/// # Errors
/// Returns an error for an invalid scenario or configuration, or when the
/// dedicated worker pool cannot be built.
pub fn optimize_design_and_operation(
    scenario: &Scenario,
    config: &OptimizerConfig,
) -> Result<OptimizationResult> {
    scenario.validate()?;
    config.validate()?;

    let design_speeds = config.design_speeds();
    let evaluate = |&speed: &f64| evaluate_design(scenario, config, speed);

    let outcomes: Vec<DesignOutcome> = if config.parallel {
        WorkerPool::with_workers(config.workers)
            .install(|| design_speeds.par_iter().map(evaluate).collect())?
    } else {
        design_speeds.iter().map(evaluate).collect()
    };

    let mut best: Option<EvaluatedDesign> = None;
    let mut design_speed_curve = Vec::new();
    let mut infeasible_design_speeds = Vec::new();

    for outcome in outcomes {
        match outcome {
            DesignOutcome::Infeasible(speed) => infeasible_design_speeds.push(speed),
            DesignOutcome::Feasible(evaluated) => {
                let candidate = &evaluated.candidate;
                design_speed_curve.push(DesignSpeedPoint {
                    design_speed_knots: candidate.design_speed_knots,
                    installed_power_hp: candidate.installed_power_hp,
                    objective: candidate.objective,
                    sweeps: candidate.sweeps,
                });
                let improves = match &best {
                    Some(current) => candidate.objective < current.candidate.objective,
                    None => true,
                };
                if improves {
                    best = Some(*evaluated);
                }
            }
        }
    }

    let (best_design, monthly_table) = match best {
        Some(evaluated) => (Some(evaluated.candidate), evaluated.months),
        None => (None, Vec::new()),
    };

    match &best_design {
        Some(candidate) => info!(
            design_speed = candidate.design_speed_knots,
            installed_power_hp = candidate.installed_power_hp,
            objective = candidate.objective,
            feasible = design_speed_curve.len(),
            infeasible = infeasible_design_speeds.len(),
            "optimisation finished"
        ),
        None => info!(
            infeasible = infeasible_design_speeds.len(),
            "no viable design found"
        ),
    }

    Ok(OptimizationResult {
        best_design,
        monthly_table,
        design_speed_curve,
        infeasible_design_speeds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operating_grid_excludes_upper_bound() {
        let speeds = OptimizerConfig::default().operating_speeds(4.0);
        assert_eq!(speeds.len(), 30);
        assert_eq!(speeds[0], 3.0);
        assert_eq!(speeds[29], 5.9);
    }

    #[test]
    fn empty_operating_grid_below_floor() {
        let config = OptimizerConfig {
            min_operating_speed: 8.0,
            operating_headroom: 0.0,
            ..OptimizerConfig::default()
        };
        assert!(config.operating_speeds(5.0).is_empty());
    }

    #[test]
    fn reversed_design_range_is_rejected() {
        let config = OptimizerConfig {
            min_design_speed: 9.0,
            max_design_speed: 5.0,
            ..OptimizerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn single_design_speed_grid() {
        let config = OptimizerConfig {
            min_design_speed: 6.0,
            max_design_speed: 6.0,
            ..OptimizerConfig::default()
        };
        assert_eq!(config.design_speeds(), vec![6.0]);
    }
}
