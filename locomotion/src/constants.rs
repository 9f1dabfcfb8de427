/// Extra length added below the standing half-height for the slope probe (meters).
///
/// The downward ray is `default_height * 0.5 + SLOPE_PROBE_EXTRA` long, so it
/// reaches just past the feet of a standing capsule.
pub const SLOPE_PROBE_EXTRA: f32 = 0.3;

/// Intents with a squared length below this are treated as "no input" (m^2/s^2).
pub const MIN_INTENT_SQ: f32 = 1.0e-8;
