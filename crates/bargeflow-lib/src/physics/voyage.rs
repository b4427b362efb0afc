//! Ground speeds, round-trip cycle time and trips per period.

use serde::{Deserialize, Serialize};

use super::constants::{KNOT_TO_KMH, MIN_UPSTREAM_SPEED_KMH};

/// Speeds over ground (km/h) for the loaded downstream leg and the upstream return.
///
/// The upstream speed never drops below [`MIN_UPSTREAM_SPEED_KMH`], even when
/// the current is as fast as the convoy.
pub fn ground_speeds(own_speed_knots: f64, current_speed_knots: f64) -> (f64, f64) {
    let own_kmh = own_speed_knots * KNOT_TO_KMH;
    let current_kmh = current_speed_knots * KNOT_TO_KMH;
    let downstream = own_kmh + current_kmh;
    let upstream = (own_kmh - current_kmh).max(MIN_UPSTREAM_SPEED_KMH);
    (downstream, upstream)
}

/// Inputs of one convoy round trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundTripInput {
    /// One-way distance (km).
    pub distance_km: f64,
    pub downstream_kmh: f64,
    pub upstream_kmh: f64,
    /// Cargo loaded and unloaded per trip (t).
    pub cargo_t: f64,
    pub load_rate_tph: f64,
    pub unload_rate_tph: f64,
    pub berths: u32,
    pub lock_minutes: f64,
    pub maneuver_minutes_per_hull: f64,
    pub hull_count: u32,
}

/// Round-trip duration split by activity (hours).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleTime {
    /// Sailing time, both legs.
    pub navigation: f64,
    /// Loading plus unloading.
    pub port: f64,
    /// Locks and convoy (dis)assembly.
    pub accessory: f64,
}

impl CycleTime {
    pub fn total(&self) -> f64 {
        self.navigation + self.port + self.accessory
    }

    /// Hours the main engines run: sailing and manoeuvring, not port stays.
    pub fn main_engine_hours(&self) -> f64 {
        self.navigation + self.accessory
    }
}

/// Duration of one round trip.
pub fn round_trip_hours(input: &RoundTripInput) -> CycleTime {
    let navigation =
        input.distance_km / input.downstream_kmh + input.distance_km / input.upstream_kmh;

    let berths = f64::from(input.berths);
    let port = if input.berths == 0 {
        f64::INFINITY
    } else {
        input.cargo_t / (input.load_rate_tph * berths)
            + input.cargo_t / (input.unload_rate_tph * berths)
    };

    let accessory = (input.lock_minutes
        + input.maneuver_minutes_per_hull * f64::from(input.hull_count))
        / 60.0;

    CycleTime {
        navigation,
        port,
        accessory,
    }
}

/// Whole round trips that fit in `available_days`.
///
/// A trip that cannot be completed within the period earns nothing, so the
/// count is floored. Returns 0 for a non-positive or non-finite cycle.
pub fn trips_in_period(cycle_hours: f64, available_days: f64) -> u32 {
    if !cycle_hours.is_finite() || cycle_hours <= 0.0 || available_days <= 0.0 {
        return 0;
    }
    let trips = (available_days * 24.0 / cycle_hours).floor();
    if trips >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        trips as u32
    }
}
