//! Investment and capital annuity.

use serde::{Deserialize, Serialize};

use super::constants::{
    HULL_COST_INTERCEPT, HULL_COST_SLOPE, PUSHER_COST_INTERCEPT, PUSHER_COST_SLOPE,
};
use crate::params::HullSpec;
use crate::physics::{lightship_weight, ConvoyArrangement};

/// Capital expenditure of one convoy (hulls plus pusher).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capex {
    /// Equivalent yearly payment over the asset life.
    pub annual: f64,
    /// Total investment.
    pub total: f64,
    pub hull_total: f64,
    pub pusher_total: f64,
    pub recovery_factor: f64,
}

/// Capital recovery factor `i(1+i)^n / ((1+i)^n - 1)`.
///
/// Falls back to straight-line depreciation (`1/n`) for a zero or negative
/// rate, where the annuity formula degenerates.
///
/// # Examples
/// ```
/// use bargeflow_lib::cost::capital_recovery_factor;
///
/// assert!((capital_recovery_factor(0.0, 20.0) - 0.05).abs() < 1e-12);
/// assert!((capital_recovery_factor(0.15, 20.0) - 0.159761).abs() < 1e-6);
/// ```
pub fn capital_recovery_factor(interest_rate: f64, asset_life_years: f64) -> f64 {
    if interest_rate <= 0.0 {
        return 1.0 / asset_life_years;
    }
    let growth = (1.0 + interest_rate).powf(asset_life_years);
    interest_rate * growth / (growth - 1.0)
}

/// Unit cost of one hopper barge hull.
pub fn hull_unit_cost(hull: &HullSpec) -> f64 {
    let lightship = lightship_weight(hull.length_m, hull.beam_m, hull.depth_m);
    HULL_COST_SLOPE * lightship + HULL_COST_INTERCEPT
}

/// Cost of the pusher for an installed power (BHP).
pub fn pusher_cost(installed_power_hp: f64) -> f64 {
    PUSHER_COST_SLOPE * installed_power_hp + PUSHER_COST_INTERCEPT
}

pub fn capex(
    hull: &HullSpec,
    arrangement: ConvoyArrangement,
    installed_power_hp: f64,
    interest_rate: f64,
    asset_life_years: f64,
) -> Capex {
    let hull_total = hull_unit_cost(hull) * f64::from(arrangement.hull_count());
    let pusher_total = pusher_cost(installed_power_hp);
    let total = hull_total + pusher_total;
    let recovery_factor = capital_recovery_factor(interest_rate, asset_life_years);

    Capex {
        annual: total * recovery_factor,
        total,
        hull_total,
        pusher_total,
        recovery_factor,
    }
}
