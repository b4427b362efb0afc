//! Bargeflow library entry points.
//!
//! This crate sizes a pushed river barge convoy and evaluates its yearly
//! economics under a seasonal river depth profile. It exposes one annual
//! simulator ([`simulate_year`]), one joint design/operation optimiser
//! ([`optimize_design_and_operation`]) and a fleet scaler
//! ([`scale_to_demand`]). Every call is a pure function of its inputs.
//!
//! The [`physics`] and [`cost`] modules hold the formulas both entry points
//! share; consumers such as the CLI should go through the functions exported
//! here instead of recombining them.

#![deny(warnings)]

pub mod cost;
pub mod error;
pub mod fleet;
pub mod optimizer;
pub mod parallel;
pub mod params;
pub mod physics;
pub mod simulation;

pub use error::{Error, Result};
pub use fleet::{scale_to_demand, FleetResult};
pub use optimizer::{
    optimize_design_and_operation, DesignCandidate, DesignSpeedPoint, OptimizationResult,
    OptimizerConfig,
};
pub use parallel::WorkerPool;
pub use params::{
    ChannelSpec, ConvoyParams, EngineeringParams, FinancialParams, HullSpec, OperationalParams,
    RiverDepthProfile, Scenario, MONTHS,
};
pub use physics::ConvoyArrangement;
pub use simulation::{
    simulate_year, AnnualResult, ConvoyDesign, CostBreakdown, MonthlyResult, OperatingPlan,
    OperatingPoint,
};
