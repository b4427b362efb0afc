//! Convoy formation (hulls in line × hulls abreast).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::{BEND_RADIUS_TO_LENGTH, MAX_COLUMNS, MAX_ROWS};

/// Formation of a pushed convoy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvoyArrangement {
    /// Hulls in line (along the convoy length).
    pub rows: u32,
    /// Hulls abreast (across the convoy beam).
    pub columns: u32,
}

impl ConvoyArrangement {
    pub fn hull_count(&self) -> u32 {
        self.rows * self.columns
    }

    /// Overall convoy length (m).
    pub fn total_length(&self, hull_length_m: f64) -> f64 {
        hull_length_m * f64::from(self.rows)
    }

    /// Overall convoy beam (m).
    pub fn total_beam(&self, hull_beam_m: f64) -> f64 {
        hull_beam_m * f64::from(self.columns)
    }
}

impl fmt::Display for ConvoyArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Derive the convoy formation from hull size and river geometry.
///
/// Rows are bounded by the bend radius (a rigid convoy needs a radius of five
/// convoy lengths, at most 7 hulls in line); columns by the channel width (at
/// most 5 abreast). When the formation would come out wider than long, the
/// beam is reduced to one hull more than the length, which keeps the
/// formation close to square instead of a wide, short block.
///
/// # Examples
/// ```
/// use bargeflow_lib::physics::arrangement;
///
/// let convoy = arrangement(60.96, 10.67, 800.0, 100.0);
/// assert_eq!((convoy.rows, convoy.columns), (2, 3));
/// ```
pub fn arrangement(
    hull_length_m: f64,
    hull_beam_m: f64,
    bend_radius_m: f64,
    channel_width_m: f64,
) -> ConvoyArrangement {
    let row_bound = (bend_radius_m / BEND_RADIUS_TO_LENGTH / hull_length_m).min(MAX_ROWS);
    let column_bound = (channel_width_m / hull_beam_m).min(MAX_COLUMNS);

    let rows = floor_at_least_one(row_bound);
    let fitting_columns = floor_at_least_one(column_bound);

    let columns = if f64::from(rows) / column_bound < 1.0 {
        (rows + 1).min(fitting_columns)
    } else {
        fitting_columns
    };

    ConvoyArrangement {
        rows,
        columns: columns.max(1),
    }
}

fn floor_at_least_one(bound: f64) -> u32 {
    if bound.is_finite() && bound >= 1.0 {
        bound.floor() as u32
    } else {
        1
    }
}

/// Shape factor of the effective power regression for a formation.
///
/// Formations absent from the table use the conservative default.
pub fn shape_factor(arrangement: ConvoyArrangement) -> f64 {
    match (arrangement.rows, arrangement.columns) {
        (1, 1) => 0.040,
        (2, 1) => 0.050,
        (1, 2) => 0.043,
        (3, 1) => 0.040,
        (2, 2) => 0.045,
        (3, 2) => 0.058,
        (2, 3) => 0.070,
        _ => super::constants::DEFAULT_SHAPE_FACTOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_river_gives_two_by_three() {
        let convoy = arrangement(60.96, 10.67, 800.0, 100.0);
        assert_eq!(convoy, ConvoyArrangement { rows: 2, columns: 3 });
        assert_eq!(convoy.hull_count(), 6);
    }

    #[test]
    fn caps_apply_on_wide_gentle_rivers() {
        let convoy = arrangement(60.96, 10.67, 10_000.0, 1_000.0);
        assert_eq!(convoy.rows, 7);
        assert_eq!(convoy.columns, 5);
    }

    #[test]
    fn tight_river_still_has_one_hull() {
        let convoy = arrangement(60.96, 10.67, 100.0, 8.0);
        assert_eq!(convoy, ConvoyArrangement { rows: 1, columns: 1 });
    }

    #[test]
    fn wide_formation_never_exceeds_channel() {
        // One hull in line, room for 1.5 hulls abreast: the +1 rule must not
        // push a second hull into a channel that only fits one.
        let convoy = arrangement(60.96, 10.67, 400.0, 16.0);
        assert_eq!(convoy, ConvoyArrangement { rows: 1, columns: 1 });
    }

    #[test]
    fn unlisted_formation_uses_default_factor() {
        let factor = shape_factor(ConvoyArrangement { rows: 5, columns: 4 });
        assert_eq!(factor, 0.07);
        assert_eq!(shape_factor(ConvoyArrangement { rows: 1, columns: 1 }), 0.04);
    }
}
