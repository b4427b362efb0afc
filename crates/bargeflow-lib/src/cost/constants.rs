//! Cost regressions, rates and factors.

/// Hull unit cost regression on lightship weight: slope (per tonne).
pub const HULL_COST_SLOPE: f64 = 7182.1661;

/// Hull unit cost regression: intercept.
pub const HULL_COST_INTERCEPT: f64 = 144536.9815;

/// Pusher cost regression on installed power: slope (per BHP).
pub const PUSHER_COST_SLOPE: f64 = 612.5116;

/// Pusher cost regression: intercept.
pub const PUSHER_COST_INTERCEPT: f64 = 70039.8262;

/// Yearly maintenance as a fraction of the investment.
pub const MAINTENANCE_RATE: f64 = 0.04;

/// Yearly hull and machinery insurance as a fraction of the investment.
pub const INSURANCE_RATE: f64 = 0.015;

/// Administrative overhead applied to fixed OPEX and to fuel.
pub const ADMINISTRATIVE_RATE: f64 = 0.10;

/// CO₂ emitted per kilogram of diesel burnt (kg/kg).
pub const CO2_EMISSION_FACTOR: f64 = 3.206;

pub const MONTHS_PER_YEAR: f64 = 12.0;
