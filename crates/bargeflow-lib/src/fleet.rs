//! Scale one convoy's annual result to the fleet a market demand needs.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::simulation::AnnualResult;

/// Fleet sized for a yearly demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FleetResult {
    pub fleet_count: u64,
    /// Cargo the whole fleet can carry in a year (t).
    pub fleet_capacity_t: f64,
    pub fleet_investment: f64,
    pub fleet_annual_cost: f64,
    /// Fleet annual cost divided by the demand, not by the fleet capacity, so
    /// spare capacity on the last convoy shows up as a higher cost per tonne.
    pub realized_unit_cost: f64,
}

impl FleetResult {
    /// Result for a convoy that carries nothing: no fleet can meet the demand.
    pub fn unserviceable() -> Self {
        Self {
            fleet_count: 0,
            fleet_capacity_t: 0.0,
            fleet_investment: 0.0,
            fleet_annual_cost: 0.0,
            realized_unit_cost: f64::INFINITY,
        }
    }

    /// Capacity left unused on the fleet (t).
    pub fn spare_capacity_t(&self, demand_t: f64) -> f64 {
        (self.fleet_capacity_t - demand_t).max(0.0)
    }
}

/// Number of convoys needed to carry `demand_t`: `ceil(demand / capacity)`.
pub fn fleet_size(demand_t: f64, unit_capacity_t: f64) -> u64 {
    if unit_capacity_t <= 0.0 || demand_t <= 0.0 {
        return 0;
    }
    let count = (demand_t / unit_capacity_t).ceil();
    if count >= u64::MAX as f64 {
        u64::MAX
    } else {
        count as u64
    }
}

/// Extrapolate one convoy to a fleet carrying `demand_t` tonnes a year.
///
/// A convoy with no yearly capacity yields [`FleetResult::unserviceable`]
/// instead of an error.
///
/// # Errors
/// Returns [`Error::InvalidParameter`] when the demand is not a finite
/// positive number.
///
/// # Examples
/// ```
/// use bargeflow_lib::{scale_to_demand, simulate_year, OperatingPlan, Scenario};
///
/// let unit = simulate_year(&Scenario::reference(), &OperatingPlan::default()).unwrap();
/// let fleet = scale_to_demand(&unit, 10_000_000.0).unwrap();
/// assert!(fleet.fleet_capacity_t >= 10_000_000.0);
/// ```
pub fn scale_to_demand(unit: &AnnualResult, demand_t: f64) -> Result<FleetResult> {
    if !demand_t.is_finite() || demand_t <= 0.0 {
        return Err(Error::invalid(
            "demand",
            format!("must be a finite positive number, got {demand_t}"),
        ));
    }

    let unit_capacity = unit.total_cargo_t;
    if unit_capacity <= 0.0 {
        debug!(demand_t, "convoy carries nothing, demand cannot be met");
        return Ok(FleetResult::unserviceable());
    }

    let fleet_count = fleet_size(demand_t, unit_capacity);
    let count = fleet_count as f64;
    let fleet_annual_cost = unit.total_annual_cost * count;

    debug!(demand_t, fleet_count, "scaled fleet to demand");
    Ok(FleetResult {
        fleet_count,
        fleet_capacity_t: unit_capacity * count,
        fleet_investment: unit.investment * count,
        fleet_annual_cost,
        realized_unit_cost: fleet_annual_cost / demand_t,
    })
}
