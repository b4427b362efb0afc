//! Restricted-channel propulsion power for pushed convoys.

use super::arrangement::{shape_factor, ConvoyArrangement};
use super::constants::{
    AUXILIARY_POWER_RATIO, BEAM_EXPONENT, DRAFT_EXPONENT_BASE, FOOT_M, KNOT_TO_MS, KW_TO_HP,
    LATERAL_CLEARANCE_COEFFICIENT, LENGTH_EXPONENT, LIGHT_DRAFT_CORRECTION,
    LIGHT_DRAFT_THRESHOLD_M, RESISTANCE_COEFFICIENT, UNDER_KEEL_COEFFICIENT,
};

/// Inputs of the propulsion power regression.
///
/// Grouped to stay under clippy's `too_many_arguments` threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionInput {
    pub hull_length_m: f64,
    pub hull_beam_m: f64,
    pub arrangement: ConvoyArrangement,
    pub draft_m: f64,
    /// Water depth of the channel (m).
    pub channel_depth_m: f64,
    pub channel_width_m: f64,
    pub speed_knots: f64,
    /// Overall propulsive efficiency (0, 1].
    pub propulsor_efficiency: f64,
}

impl PropulsionInput {
    pub fn total_length(&self) -> f64 {
        self.arrangement.total_length(self.hull_length_m)
    }

    pub fn total_beam(&self) -> f64 {
        self.arrangement.total_beam(self.hull_beam_m)
    }
}

/// Brake horsepower needed to push the convoy through a restricted channel.
///
/// Effective power (kW) follows the Howe/Padovezi form
/// `k·F·exp(0.445/(h−T))·(T/0.3048)^(0.6+15.24/(W−B))·L^0.38·B^1.19·v³`
/// with an extra `1.83·v³` when the convoy runs light (T < 0.80 m). The
/// result is converted to HP and divided by the propulsive efficiency.
///
/// Returns `None` when the formula is undefined: no water under the keel
/// (`h ≤ T`), no lateral clearance (`W ≤ B`), non-positive efficiency, or a
/// non-finite result. Callers treat `None` as "this operating point is not
/// feasible".
pub fn propulsion_power(input: &PropulsionInput) -> Option<f64> {
    let under_keel = input.channel_depth_m - input.draft_m;
    let lateral_clearance = input.channel_width_m - input.total_beam();
    if under_keel <= 0.0 || lateral_clearance <= 0.0 || input.propulsor_efficiency <= 0.0 {
        return None;
    }
    if input.draft_m < 0.0 {
        return None;
    }

    let speed_ms = input.speed_knots * KNOT_TO_MS;
    let speed_cubed = speed_ms.powi(3);

    let under_keel_term = (UNDER_KEEL_COEFFICIENT / under_keel).exp();
    let draft_exponent = DRAFT_EXPONENT_BASE + LATERAL_CLEARANCE_COEFFICIENT / lateral_clearance;
    let draft_term = (input.draft_m / FOOT_M).powf(draft_exponent);

    let mut effective_kw = RESISTANCE_COEFFICIENT
        * shape_factor(input.arrangement)
        * under_keel_term
        * draft_term
        * input.total_length().powf(LENGTH_EXPONENT)
        * input.total_beam().powf(BEAM_EXPONENT)
        * speed_cubed;

    if input.draft_m < LIGHT_DRAFT_THRESHOLD_M {
        effective_kw += LIGHT_DRAFT_CORRECTION * speed_cubed;
    }

    let brake_hp = effective_kw * KW_TO_HP / input.propulsor_efficiency;
    brake_hp.is_finite().then_some(brake_hp)
}

/// Generator power drawn throughout the voyage cycle (HP).
pub fn auxiliary_power(main_power_hp: f64) -> f64 {
    main_power_hp * AUXILIARY_POWER_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_input() -> PropulsionInput {
        PropulsionInput {
            hull_length_m: 60.96,
            hull_beam_m: 10.67,
            arrangement: ConvoyArrangement {
                rows: 2,
                columns: 3,
            },
            draft_m: 3.66,
            channel_depth_m: 10.98,
            channel_width_m: 100.0,
            speed_knots: 6.0,
            propulsor_efficiency: 0.5,
        }
    }

    #[test]
    fn power_grows_with_the_cube_of_speed() {
        let slow = propulsion_power(&reference_input()).expect("defined");
        let fast = propulsion_power(&PropulsionInput {
            speed_knots: 12.0,
            ..reference_input()
        })
        .expect("defined");
        assert!((fast / slow - 8.0).abs() < 1e-9);
    }

    #[test]
    fn shallow_water_costs_more_power() {
        let deep = propulsion_power(&reference_input()).expect("defined");
        let shallow = propulsion_power(&PropulsionInput {
            channel_depth_m: 4.16,
            ..reference_input()
        })
        .expect("defined");
        assert!(shallow > deep);
    }

    #[test]
    fn grounded_or_blocked_channel_is_undefined() {
        assert_eq!(
            propulsion_power(&PropulsionInput {
                channel_depth_m: 3.66,
                ..reference_input()
            }),
            None
        );
        assert_eq!(
            propulsion_power(&PropulsionInput {
                channel_width_m: 32.0,
                ..reference_input()
            }),
            None
        );
    }

    #[test]
    fn light_running_adds_correction() {
        let input = PropulsionInput {
            draft_m: 0.5,
            ..reference_input()
        };
        let with_correction = propulsion_power(&input).expect("defined");
        let speed_ms = 6.0 * KNOT_TO_MS;
        let correction_hp = LIGHT_DRAFT_CORRECTION * speed_ms.powi(3) * KW_TO_HP / 0.5;
        assert!(with_correction > correction_hp);
    }

    #[test]
    fn auxiliary_is_a_quarter_of_main() {
        assert_eq!(auxiliary_power(1000.0), 250.0);
    }
}
