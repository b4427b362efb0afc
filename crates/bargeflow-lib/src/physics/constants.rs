//! Physical constants and regression coefficients shared by the hull,
//! propulsion and voyage calculations.

/// Kilometres per hour in one knot.
pub const KNOT_TO_KMH: f64 = 1.852;

/// Metres per second in one knot.
pub const KNOT_TO_MS: f64 = 0.514444;

/// Horsepower in one kilowatt.
pub const KW_TO_HP: f64 = 1.34102;

/// Metres in one foot; the resistance regression works on drafts in feet.
pub const FOOT_M: f64 = 0.3048;

/// Fresh water density (t/m³).
pub const FRESH_WATER_DENSITY: f64 = 1.0;

/// Lightship regression on the cubic number: intercept (t).
pub const LIGHTSHIP_INTERCEPT_T: f64 = 18.858037300571;

/// Lightship regression on the cubic number: slope (t per 1000 m³).
pub const LIGHTSHIP_SLOPE_T: f64 = 112.865401771503;

/// A rigid convoy negotiates a bend whose radius is at least five convoy lengths.
pub const BEND_RADIUS_TO_LENGTH: f64 = 5.0;

/// Maximum hulls in line.
pub const MAX_ROWS: f64 = 7.0;

/// Maximum hulls abreast.
pub const MAX_COLUMNS: f64 = 5.0;

/// Scale coefficient of the restricted-channel effective power regression.
pub const RESISTANCE_COEFFICIENT: f64 = 0.14426;

/// Numerator of the under-keel term `exp(0.445 / (h - T))`.
pub const UNDER_KEEL_COEFFICIENT: f64 = 0.445;

/// Base exponent of the draft term.
pub const DRAFT_EXPONENT_BASE: f64 = 0.6;

/// Lateral clearance coefficient of the draft exponent (m).
pub const LATERAL_CLEARANCE_COEFFICIENT: f64 = 15.24;

/// Convoy length exponent.
pub const LENGTH_EXPONENT: f64 = 0.38;

/// Convoy beam exponent.
pub const BEAM_EXPONENT: f64 = 1.19;

/// Drafts below this value (m) are treated as running light.
pub const LIGHT_DRAFT_THRESHOLD_M: f64 = 0.80;

/// Additive effective power for light-running hulls, multiplied by v³ (kW).
pub const LIGHT_DRAFT_CORRECTION: f64 = 1.83;

/// Shape factor used for formations missing from the table.
pub const DEFAULT_SHAPE_FACTOR: f64 = 0.07;

/// Auxiliary (generator) power as a fraction of main propulsion power.
pub const AUXILIARY_POWER_RATIO: f64 = 0.25;

/// Upstream ground speed floor (km/h); keeps voyage time finite against strong currents.
pub const MIN_UPSTREAM_SPEED_KMH: f64 = 0.1;
