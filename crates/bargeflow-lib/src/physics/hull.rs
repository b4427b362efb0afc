//! Hull weight, displacement and cargo capacity.

use super::constants::{FRESH_WATER_DENSITY, LIGHTSHIP_INTERCEPT_T, LIGHTSHIP_SLOPE_T};

/// Estimate the lightship (empty hull) weight of a hopper barge in tonnes.
///
/// Linear regression on the cubic number `L·B·D / 1000`.
///
/// # Examples
/// ```
/// use bargeflow_lib::physics::lightship_weight;
///
/// let weight = lightship_weight(60.96, 10.67, 4.27);
/// assert!((weight - 332.3).abs() < 1.0);
/// ```
pub fn lightship_weight(length_m: f64, beam_m: f64, depth_m: f64) -> f64 {
    LIGHTSHIP_INTERCEPT_T + LIGHTSHIP_SLOPE_T * (length_m * beam_m * depth_m / 1000.0)
}

/// Displaced volume (m³) of one hull floating at `draft_m`.
pub fn displaced_volume(length_m: f64, beam_m: f64, draft_m: f64, block_coefficient: f64) -> f64 {
    length_m * beam_m * draft_m * block_coefficient
}

/// Deadweight available for cargo (t): displacement minus lightship, never negative.
pub fn cargo_capacity(displaced_volume_m3: f64, lightship_t: f64, water_density: f64) -> f64 {
    (displaced_volume_m3 * water_density - lightship_t).max(0.0)
}

/// Cargo capacity (t) of one hull in fresh water.
pub fn hull_cargo_capacity(
    length_m: f64,
    beam_m: f64,
    depth_m: f64,
    draft_m: f64,
    block_coefficient: f64,
) -> f64 {
    let volume = displaced_volume(length_m, beam_m, draft_m, block_coefficient);
    let lightship = lightship_weight(length_m, beam_m, depth_m);
    cargo_capacity(volume, lightship, FRESH_WATER_DENSITY)
}

/// Draft a convoy may load to in a month: limited by the river (depth minus
/// keel clearance) and by the structural design draft, never negative.
pub fn operating_draft(river_depth_m: f64, keel_clearance_m: f64, structural_draft_m: f64) -> f64 {
    (river_depth_m - keel_clearance_m)
        .min(structural_draft_m)
        .max(0.0)
}
