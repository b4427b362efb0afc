//! Per-month table of operating speeds a design can sustain.

use tracing::debug;

use super::descent::OptionValue;
use crate::params::{Scenario, MONTHS};
use crate::simulation::{evaluate_month, ConvoyDesign, MonthlyResult};

/// Operating options of each month for one design, January first.
///
/// Only speeds whose required power fits under the installed power (within
/// the tolerance) and which carry cargo are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibleOptions {
    months: Vec<Vec<MonthlyResult>>,
}

impl FeasibleOptions {
    /// Build the table, or `None` when some month has no feasible speed.
    pub fn build(
        scenario: &Scenario,
        design: &ConvoyDesign,
        operating_speeds: &[f64],
        power_tolerance: f64,
    ) -> Option<Self> {
        let ceiling = design.installed_power_hp * (1.0 + power_tolerance);
        let mut months = Vec::with_capacity(MONTHS);

        for month in 1..=MONTHS {
            let options: Vec<MonthlyResult> = operating_speeds
                .iter()
                .map(|&speed| evaluate_month(scenario, design, month, speed))
                .filter(|result| {
                    result
                        .required_power_hp
                        .is_some_and(|power| power <= ceiling)
                        && result.cargo_t > 0.0
                })
                .collect();

            if options.is_empty() {
                debug!(
                    design_speed = design.design_speed_knots,
                    month, "no feasible operating speed"
                );
                return None;
            }
            months.push(options);
        }

        Some(Self { months })
    }

    /// Options of a month, 0-based.
    pub fn month(&self, index: usize) -> &[MonthlyResult] {
        self.months.get(index).map_or(&[], Vec::as_slice)
    }

    pub fn option_count(&self) -> usize {
        self.months.iter().map(Vec::len).sum()
    }

    /// Cost and cargo view of the table for the descent.
    pub fn values(&self) -> Vec<Vec<OptionValue>> {
        self.months
            .iter()
            .map(|options| {
                options
                    .iter()
                    .map(|result| OptionValue {
                        variable_cost: result.variable_cost,
                        cargo_t: result.cargo_t,
                    })
                    .collect()
            })
            .collect()
    }

    /// The chosen month results for one index per month.
    pub fn select(&self, indices: &[usize]) -> Vec<MonthlyResult> {
        self.months
            .iter()
            .zip(indices)
            .filter_map(|(options, &index)| options.get(index).copied())
            .collect()
    }
}
