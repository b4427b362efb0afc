//! Annual simulation of one convoy over a twelve-month river depth profile.
//!
//! The engine is sized once for the whole year at the deepest month's draft
//! and the design speed. Each month is then evaluated independently at its
//! own draft and speed, and the twelve results are folded into an
//! [`AnnualResult`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cost::{
    administrative_overhead, capex, fixed_opex, variable_opex, Capex, CrewCosts, FixedOpex,
    PowerProfile, VariableOpex,
};
use crate::error::{Error, Result};
use crate::params::{Scenario, MONTHS};
use crate::physics::{
    auxiliary_power, ground_speeds, hull_cargo_capacity, propulsion_power, round_trip_hours,
    trips_in_period, ConvoyArrangement, PropulsionInput, RoundTripInput,
};

/// Relative slack allowed when comparing required with installed power.
pub const POWER_TOLERANCE: f64 = 0.001;

/// How the convoy is operated over the year.
///
/// The default plan sails every month at the scenario's cruise speed with
/// an engine sized for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingPlan {
    /// Speed through water for each month (knots), January first.
    pub monthly_speeds: Option<Vec<f64>>,
    /// Installed power (BHP) to use instead of sizing the engine.
    pub forced_power: Option<f64>,
}

impl OperatingPlan {
    /// Same speed every month.
    pub fn constant_speed(speed_knots: f64) -> Self {
        Self {
            monthly_speeds: Some(vec![speed_knots; MONTHS]),
            forced_power: None,
        }
    }

    pub fn with_forced_power(mut self, power_hp: f64) -> Self {
        self.forced_power = Some(power_hp);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(speeds) = &self.monthly_speeds {
            if speeds.len() != MONTHS {
                return Err(Error::invalid(
                    "monthly_speeds",
                    format!("expected {MONTHS} monthly speeds, got {}", speeds.len()),
                ));
            }
            if let Some((index, speed)) = speeds
                .iter()
                .enumerate()
                .find(|(_, speed)| !speed.is_finite() || **speed <= 0.0)
            {
                return Err(Error::invalid(
                    "monthly_speeds",
                    format!("month {} speed must be positive, got {speed}", index + 1),
                ));
            }
        }
        if let Some(power) = self.forced_power {
            if !power.is_finite() || power <= 0.0 {
                return Err(Error::invalid(
                    "forced_power",
                    format!("must be a finite positive number, got {power}"),
                ));
            }
        }
        Ok(())
    }

    /// Speed the engine is sized for: the fastest planned month.
    pub fn design_speed(&self, cruise_speed_knots: f64) -> f64 {
        match &self.monthly_speeds {
            Some(speeds) => speeds.iter().copied().fold(f64::MIN, f64::max),
            None => cruise_speed_knots,
        }
    }

    /// Speed of a month, 1-based.
    pub fn speed_for(&self, month: usize, cruise_speed_knots: f64) -> f64 {
        self.monthly_speeds
            .as_ref()
            .zip(month.checked_sub(1))
            .and_then(|(speeds, index)| speeds.get(index).copied())
            .unwrap_or(cruise_speed_knots)
    }
}

/// Loading draft and speed of one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub month: u32,
    pub draft_m: f64,
    pub speed_knots: f64,
}

/// Engine size and the year-invariant costs that follow from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvoyDesign {
    pub arrangement: ConvoyArrangement,
    pub design_speed_knots: f64,
    /// Installed main engine power (BHP); the ceiling for every month.
    pub installed_power_hp: f64,
    pub capex: Capex,
    pub fixed_opex: FixedOpex,
}

impl ConvoyDesign {
    /// Design with a given installed power.
    pub fn with_power(scenario: &Scenario, design_speed_knots: f64, installed_power_hp: f64) -> Self {
        let params = &scenario.params;
        let arrangement = params.arrangement();
        let capex = capex(
            &params.hull,
            arrangement,
            installed_power_hp,
            params.financial.interest_rate,
            params.financial.asset_life_years,
        );
        let fixed_opex = fixed_opex(
            capex.total,
            &CrewCosts {
                crew_count: params.operational.crew_count,
                average_salary: params.financial.average_salary,
                meal_allowance: params.financial.meal_allowance,
                payroll_burden_pct: params.financial.payroll_burden_pct,
            },
        );

        Self {
            arrangement,
            design_speed_knots,
            installed_power_hp,
            capex,
            fixed_opex,
        }
    }

    /// Design whose engine can push the fully loaded convoy at `design_speed_knots`
    /// in the deepest month. `None` when the propulsion power is undefined there.
    pub fn sized_for(scenario: &Scenario, design_speed_knots: f64) -> Option<Self> {
        installed_power(scenario, design_speed_knots)
            .map(|power| Self::with_power(scenario, design_speed_knots, power))
    }

    /// Capital annuity plus fixed OPEX.
    pub fn fixed_annual_cost(&self) -> f64 {
        self.capex.annual + self.fixed_opex.total
    }

    /// Whether `required_hp` fits the installed power within [`POWER_TOLERANCE`].
    pub fn can_deliver(&self, required_hp: f64) -> bool {
        required_hp <= self.installed_power_hp * (1.0 + POWER_TOLERANCE)
    }
}

/// Main engine power (BHP) needed at the worst-case draft, in the deepest
/// month, at `design_speed_knots`.
pub fn installed_power(scenario: &Scenario, design_speed_knots: f64) -> Option<f64> {
    let params = &scenario.params;
    propulsion_power(&PropulsionInput {
        hull_length_m: params.hull.length_m,
        hull_beam_m: params.hull.beam_m,
        arrangement: params.arrangement(),
        draft_m: scenario.worst_case_draft(),
        channel_depth_m: scenario.depth_profile.max_depth(),
        channel_width_m: params.channel.width_m,
        speed_knots: design_speed_knots,
        propulsor_efficiency: params.engineering.propulsor_efficiency,
    })
}

/// Physical and economic outcome of one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyResult {
    pub month: u32,
    pub depth_m: f64,
    pub draft_m: f64,
    pub speed_knots: f64,
    pub cycle_hours: f64,
    /// Completed round trips.
    pub trips: u32,
    pub cargo_per_trip_t: f64,
    pub cargo_t: f64,
    pub fuel_mass_kg: f64,
    pub fuel_cost: f64,
    /// Fuel cost plus administrative overhead.
    pub variable_cost: f64,
    pub emissions_t: f64,
    /// Main engine power needed at this month's draft and speed; `None` when
    /// the channel leaves no room for the convoy.
    pub required_power_hp: Option<f64>,
    pub within_installed_power: bool,
}

impl MonthlyResult {
    pub fn operating_point(&self) -> OperatingPoint {
        OperatingPoint {
            month: self.month,
            draft_m: self.draft_m,
            speed_knots: self.speed_knots,
        }
    }

    /// Whether the convoy sails at all this month.
    pub fn is_active(&self) -> bool {
        self.trips > 0 && self.cargo_t > 0.0
    }
}

/// Evaluate one month (1-based) at `speed_knots`.
///
/// Trips fill the month whenever the propulsion power is defined, even if
/// the draft leaves no room for cargo; the convoy then sails empty and still
/// burns fuel. A month with undefined propulsion power is idle: no trips, no
/// fuel, no cargo.
pub fn evaluate_month(
    scenario: &Scenario,
    design: &ConvoyDesign,
    month: usize,
    speed_knots: f64,
) -> MonthlyResult {
    let params = &scenario.params;
    let hull = &params.hull;
    let operational = &params.operational;
    let hull_count = design.arrangement.hull_count();

    let depth_m = scenario.depth_profile.month(month).unwrap_or(0.0);
    let draft_m = scenario.month_draft(month).unwrap_or(0.0);

    let cargo_per_trip_t = hull_cargo_capacity(
        hull.length_m,
        hull.beam_m,
        hull.depth_m,
        draft_m,
        hull.block_coefficient,
    ) * f64::from(hull_count);

    let required_power_hp = propulsion_power(&PropulsionInput {
        hull_length_m: hull.length_m,
        hull_beam_m: hull.beam_m,
        arrangement: design.arrangement,
        draft_m,
        channel_depth_m: depth_m,
        channel_width_m: params.channel.width_m,
        speed_knots,
        propulsor_efficiency: params.engineering.propulsor_efficiency,
    });

    let (downstream_kmh, upstream_kmh) =
        ground_speeds(speed_knots, operational.current_speed_knots);
    let cycle = round_trip_hours(&RoundTripInput {
        distance_km: operational.distance_km,
        downstream_kmh,
        upstream_kmh,
        cargo_t: cargo_per_trip_t,
        load_rate_tph: operational.load_rate_tph,
        unload_rate_tph: operational.unload_rate_tph,
        berths: operational.berths,
        lock_minutes: operational.lock_minutes,
        maneuver_minutes_per_hull: operational.maneuver_minutes_per_hull,
        hull_count,
    });

    let within_installed_power = required_power_hp.is_some_and(|power| design.can_deliver(power));

    let (trips, fuel) = match required_power_hp {
        Some(main_power_hp) => {
            if cargo_per_trip_t <= 0.0 {
                debug!(month, draft_m, "no cargo capacity, convoy sails empty");
            }
            let trips = trips_in_period(cycle.total(), scenario.days_per_month());
            let trips_f = f64::from(trips);
            let fuel = variable_opex(
                &PowerProfile {
                    main_power_hp,
                    main_hours: cycle.main_engine_hours() * trips_f,
                    auxiliary_power_hp: auxiliary_power(main_power_hp),
                    auxiliary_hours: cycle.total() * trips_f,
                },
                params.engineering.specific_fuel_consumption,
                params.financial.fuel_price_per_litre,
                params.financial.fuel_density,
            );
            (trips, fuel)
        }
        None => {
            warn!(month, depth_m, draft_m, "propulsion undefined, convoy idle");
            (0, VariableOpex::default())
        }
    };

    MonthlyResult {
        month: month as u32,
        depth_m,
        draft_m,
        speed_knots,
        cycle_hours: cycle.total(),
        trips,
        cargo_per_trip_t,
        cargo_t: cargo_per_trip_t * f64::from(trips),
        fuel_mass_kg: fuel.fuel_mass_kg,
        fuel_cost: fuel.fuel_cost,
        variable_cost: fuel.with_overhead(),
        emissions_t: fuel.co2_tons,
        required_power_hp,
        within_installed_power,
    }
}

/// Sums over a set of months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub trips: u32,
    pub cargo_t: f64,
    pub fuel_mass_kg: f64,
    pub fuel_cost: f64,
    pub variable_cost: f64,
    pub emissions_t: f64,
}

impl MonthlyTotals {
    pub fn add(self, month: &MonthlyResult) -> Self {
        Self {
            trips: self.trips.saturating_add(month.trips),
            cargo_t: self.cargo_t + month.cargo_t,
            fuel_mass_kg: self.fuel_mass_kg + month.fuel_mass_kg,
            fuel_cost: self.fuel_cost + month.fuel_cost,
            variable_cost: self.variable_cost + month.variable_cost,
            emissions_t: self.emissions_t + month.emissions_t,
        }
    }
}

impl<'a> FromIterator<&'a MonthlyResult> for MonthlyTotals {
    fn from_iter<I: IntoIterator<Item = &'a MonthlyResult>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::add)
    }
}

/// `amount / cargo`, or `+∞` when nothing was carried.
pub fn per_ton(amount: f64, cargo_t: f64) -> f64 {
    if cargo_t > 0.0 {
        amount / cargo_t
    } else {
        f64::INFINITY
    }
}

/// Where the yearly money goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub fuel: f64,
    pub capital: f64,
    /// Overhead on fixed OPEX plus overhead on fuel.
    pub administrative: f64,
    pub crew_and_meals: f64,
    pub maintenance_and_insurance: f64,
}

impl CostBreakdown {
    pub fn new(design: &ConvoyDesign, totals: &MonthlyTotals) -> Self {
        Self {
            fuel: totals.fuel_cost,
            capital: design.capex.annual,
            administrative: design.fixed_opex.admin + administrative_overhead(totals.fuel_cost),
            crew_and_meals: design.fixed_opex.crew + design.fixed_opex.meals,
            maintenance_and_insurance: design.fixed_opex.maintenance + design.fixed_opex.insurance,
        }
    }

    pub fn total(&self) -> f64 {
        self.fuel
            + self.capital
            + self.administrative
            + self.crew_and_meals
            + self.maintenance_and_insurance
    }
}

/// One year of operation of one convoy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualResult {
    pub arrangement: ConvoyArrangement,
    pub design_speed_knots: f64,
    pub installed_power_hp: f64,
    /// Initial investment in hulls and pusher.
    pub investment: f64,
    pub fixed_annual_cost: f64,
    pub variable_annual_cost: f64,
    pub total_annual_cost: f64,
    pub total_cargo_t: f64,
    pub total_trips: u32,
    pub total_fuel_kg: f64,
    pub total_emissions_t: f64,
    /// Total cost per tonne carried; `+∞` (serialised as `null`) when nothing was carried.
    pub unit_cost: f64,
    /// kg CO₂ per tonne carried; `+∞` when nothing was carried.
    pub carbon_intensity_kg_per_t: f64,
    pub cost_breakdown: CostBreakdown,
    pub months: Vec<MonthlyResult>,
}

impl AnnualResult {
    pub fn from_months(design: &ConvoyDesign, months: Vec<MonthlyResult>) -> Self {
        let totals: MonthlyTotals = months.iter().collect();
        let fixed_annual_cost = design.fixed_annual_cost();
        let total_annual_cost = fixed_annual_cost + totals.variable_cost;

        Self {
            arrangement: design.arrangement,
            design_speed_knots: design.design_speed_knots,
            installed_power_hp: design.installed_power_hp,
            investment: design.capex.total,
            fixed_annual_cost,
            variable_annual_cost: totals.variable_cost,
            total_annual_cost,
            total_cargo_t: totals.cargo_t,
            total_trips: totals.trips,
            total_fuel_kg: totals.fuel_mass_kg,
            total_emissions_t: totals.emissions_t,
            unit_cost: per_ton(total_annual_cost, totals.cargo_t),
            carbon_intensity_kg_per_t: per_ton(totals.emissions_t * 1000.0, totals.cargo_t),
            cost_breakdown: CostBreakdown::new(design, &totals),
            months,
        }
    }
}

/// Simulate one year of operation.
///
/// The engine is sized at the plan's design speed (fastest month, or the
/// cruise speed) unless the plan forces an installed power. Months run at
/// the plan's speeds even when they need more than the installed power;
/// [`MonthlyResult::within_installed_power`] reports it.
///
/// # Errors
/// Returns [`Error::InvalidParameter`], [`Error::InvalidDepthProfile`] or
/// [`Error::InvalidGeometry`] for an invalid scenario or plan.
///
/// # Examples
/// ```
/// use bargeflow_lib::{simulate_year, OperatingPlan, Scenario};
///
/// let result = simulate_year(&Scenario::reference(), &OperatingPlan::default()).unwrap();
/// assert_eq!(result.months.len(), 12);
/// assert!(result.unit_cost.is_finite());
/// ```
pub fn simulate_year(scenario: &Scenario, plan: &OperatingPlan) -> Result<AnnualResult> {
    scenario.validate()?;
    plan.validate()?;

    let cruise = scenario.params.operational.cruise_speed_knots;
    let design_speed = plan.design_speed(cruise);
    let design = match plan.forced_power {
        Some(power) => ConvoyDesign::with_power(scenario, design_speed, power),
        None => ConvoyDesign::sized_for(scenario, design_speed).ok_or_else(|| {
            Error::InvalidGeometry {
                message: format!(
                    "propulsion power is undefined at {design_speed} kn in the deepest month"
                ),
            }
        })?,
    };

    let months: Vec<MonthlyResult> = (1..=MONTHS)
        .map(|month| evaluate_month(scenario, &design, month, plan.speed_for(month, cruise)))
        .collect();

    let result = AnnualResult::from_months(&design, months);
    debug!(
        design_speed,
        installed_power_hp = result.installed_power_hp,
        cargo_t = result.total_cargo_t,
        unit_cost = result.unit_cost,
        "simulated year"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_rejects_wrong_month_count() {
        let plan = OperatingPlan {
            monthly_speeds: Some(vec![6.0; 11]),
            forced_power: None,
        };
        assert!(matches!(plan.validate(), Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn plan_rejects_non_positive_power() {
        let plan = OperatingPlan::default().with_forced_power(0.0);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn design_speed_is_fastest_month() {
        let mut speeds = vec![5.0; MONTHS];
        speeds[7] = 7.5;
        let plan = OperatingPlan {
            monthly_speeds: Some(speeds),
            forced_power: None,
        };
        assert_eq!(plan.design_speed(6.0), 7.5);
        assert_eq!(plan.speed_for(8, 6.0), 7.5);
        assert_eq!(plan.speed_for(0, 6.0), 6.0);
        assert_eq!(plan.speed_for(13, 6.0), 6.0);
        assert_eq!(OperatingPlan::default().design_speed(6.0), 6.0);
    }

    #[test]
    fn months_too_shallow_to_load_sail_empty() {
        let mut scenario = Scenario::reference();
        let mut depths = *scenario.depth_profile.depths();
        depths[9] = 0.4;
        scenario.depth_profile = crate::params::RiverDepthProfile::new(depths).expect("valid");

        let result = simulate_year(&scenario, &OperatingPlan::default()).expect("simulates");
        let october = &result.months[9];
        let expected_trips = trips_in_period(october.cycle_hours, scenario.days_per_month());
        assert_eq!(october.draft_m, 0.0);
        assert_eq!(october.trips, expected_trips);
        assert!(october.trips > 0);
        assert_eq!(october.cargo_t, 0.0);
        assert!(october.variable_cost > 0.0);
        assert!(!october.is_active());
    }

    #[test]
    fn month_without_defined_power_is_idle() {
        let mut scenario = Scenario::reference();
        scenario.keel_clearance_m = 0.0;
        let design = ConvoyDesign::sized_for(&scenario, 6.0).expect("sizes in deepest month");

        let october = evaluate_month(&scenario, &design, 10, 6.0);
        assert_eq!(october.draft_m, october.depth_m);
        assert_eq!(october.required_power_hp, None);
        assert_eq!(october.trips, 0);
        assert_eq!(october.variable_cost, 0.0);
    }

    #[test]
    fn forced_power_flags_months_that_need_more() {
        let scenario = Scenario::reference();
        let plan = OperatingPlan::default().with_forced_power(10.0);
        let result = simulate_year(&scenario, &plan).expect("simulates");
        assert_eq!(result.installed_power_hp, 10.0);
        assert!(result.months.iter().all(|m| !m.within_installed_power));
    }

    #[test]
    fn breakdown_adds_up_to_total_cost() {
        let result =
            simulate_year(&Scenario::reference(), &OperatingPlan::default()).expect("simulates");
        let breakdown = result.cost_breakdown.total();
        assert!((breakdown - result.total_annual_cost).abs() < 1e-6 * result.total_annual_cost);
    }

    #[test]
    fn per_ton_is_infinite_without_cargo() {
        assert_eq!(per_ton(100.0, 0.0), f64::INFINITY);
        assert_eq!(per_ton(100.0, 4.0), 25.0);
    }
}
