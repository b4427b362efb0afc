//! Operating expenses: fixed yearly costs, fuel and emissions.

use serde::{Deserialize, Serialize};

use super::constants::{
    ADMINISTRATIVE_RATE, CO2_EMISSION_FACTOR, INSURANCE_RATE, MAINTENANCE_RATE, MONTHS_PER_YEAR,
};

/// Yearly fixed operating expenses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedOpex {
    pub total: f64,
    /// Salaries including payroll burden.
    pub crew: f64,
    pub meals: f64,
    pub maintenance: f64,
    pub insurance: f64,
    pub admin: f64,
}

/// Crew, asset and overhead inputs of [`fixed_opex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrewCosts {
    pub crew_count: u32,
    /// Average monthly salary per crew member.
    pub average_salary: f64,
    /// Monthly meal allowance per crew member.
    pub meal_allowance: f64,
    /// Payroll burden as a fraction of salaries (0.9 = 90 %).
    pub payroll_burden_pct: f64,
}

/// The single administrative overhead rule: 10 % of `base`.
pub fn administrative_overhead(base: f64) -> f64 {
    base * ADMINISTRATIVE_RATE
}

pub fn fixed_opex(investment_total: f64, crew: &CrewCosts) -> FixedOpex {
    let headcount = f64::from(crew.crew_count);
    let crew_cost =
        MONTHS_PER_YEAR * crew.average_salary * headcount * (1.0 + crew.payroll_burden_pct);
    let meals = MONTHS_PER_YEAR * headcount * crew.meal_allowance;
    let maintenance = investment_total * MAINTENANCE_RATE;
    let insurance = investment_total * INSURANCE_RATE;
    let admin = administrative_overhead(crew_cost + meals + maintenance + insurance);

    FixedOpex {
        total: crew_cost + meals + maintenance + insurance + admin,
        crew: crew_cost,
        meals,
        maintenance,
        insurance,
        admin,
    }
}

/// Engine load over a period: main and auxiliary power with their running hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerProfile {
    pub main_power_hp: f64,
    pub main_hours: f64,
    pub auxiliary_power_hp: f64,
    pub auxiliary_hours: f64,
}

/// Fuel burnt over a period and what it costs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VariableOpex {
    pub fuel_cost: f64,
    pub fuel_mass_kg: f64,
    pub co2_tons: f64,
}

impl VariableOpex {
    /// Fuel cost plus its administrative overhead.
    pub fn with_overhead(&self) -> f64 {
        self.fuel_cost + administrative_overhead(self.fuel_cost)
    }
}

/// CO₂ (t) emitted by burning `fuel_mass_kg` of diesel.
pub fn co2_emissions(fuel_mass_kg: f64) -> f64 {
    fuel_mass_kg * CO2_EMISSION_FACTOR / 1000.0
}

/// Fuel use of a power profile.
///
/// `specific_fuel_consumption` is in kg/HP/h, `fuel_density` in kg/L and
/// `fuel_price` per litre.
pub fn variable_opex(
    profile: &PowerProfile,
    specific_fuel_consumption: f64,
    fuel_price: f64,
    fuel_density: f64,
) -> VariableOpex {
    let main_kg = profile.main_power_hp * profile.main_hours * specific_fuel_consumption;
    let auxiliary_kg =
        profile.auxiliary_power_hp * profile.auxiliary_hours * specific_fuel_consumption;
    let fuel_mass_kg = main_kg + auxiliary_kg;

    VariableOpex {
        fuel_cost: fuel_mass_kg / fuel_density * fuel_price,
        fuel_mass_kg,
        co2_tons: co2_emissions(fuel_mass_kg),
    }
}
