//! Physical model of a pushed barge convoy.
//!
//! This module is organized into focused submodules:
//!
//! - [`arrangement`] - Convoy formation derived from hull size and river geometry
//! - [`hull`] - Lightship weight, displacement, cargo capacity and operating draft
//! - [`propulsion`] - Restricted-channel propulsion power
//! - [`voyage`] - Ground speeds, cycle time and trips per period
//! - [`constants`] - Unit conversions and regression coefficients
//!
//! # Example
//!
//! ```
//! use bargeflow_lib::physics::{
//!     arrangement, hull_cargo_capacity, propulsion_power, PropulsionInput,
//! };
//!
//! let convoy = arrangement(60.96, 10.67, 800.0, 100.0);
//! let per_hull = hull_cargo_capacity(60.96, 10.67, 4.27, 3.66, 0.9);
//! let power = propulsion_power(&PropulsionInput {
//!     hull_length_m: 60.96,
//!     hull_beam_m: 10.67,
//!     arrangement: convoy,
//!     draft_m: 3.66,
//!     channel_depth_m: 10.98,
//!     channel_width_m: 100.0,
//!     speed_knots: 6.0,
//!     propulsor_efficiency: 0.5,
//! });
//! assert!(per_hull > 0.0);
//! assert!(power.is_some());
//! ```

pub mod arrangement;
pub mod constants;
pub mod hull;
pub mod propulsion;
pub mod voyage;

pub use arrangement::{arrangement, shape_factor, ConvoyArrangement};
pub use hull::{
    cargo_capacity, displaced_volume, hull_cargo_capacity, lightship_weight, operating_draft,
};
pub use propulsion::{auxiliary_power, propulsion_power, PropulsionInput};
pub use voyage::{ground_speeds, round_trip_hours, trips_in_period, CycleTime, RoundTripInput};
