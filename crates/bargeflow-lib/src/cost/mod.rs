//! Economic model of a convoy: investment, capital annuity, fixed and
//! variable operating expenses and fuel emissions.
//!
//! - [`capex`] - Hull and pusher investment annualised with the capital recovery factor
//! - [`opex`] - Crew, maintenance, insurance, overhead and fuel
//! - [`constants`] - Cost regressions and rates

pub mod capex;
pub mod constants;
pub mod opex;

pub use capex::{capex, capital_recovery_factor, hull_unit_cost, pusher_cost, Capex};
pub use opex::{
    administrative_overhead, co2_emissions, fixed_opex, variable_opex, CrewCosts, FixedOpex,
    PowerProfile, VariableOpex,
};
