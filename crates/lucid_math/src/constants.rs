//! Circle constants.

/// Ratio of a circle's circumference to its radius.
pub const TAU: f64 = std::f64::consts::TAU;

/// Ratio of a circle's circumference to its diameter.
pub const PI: f64 = std::f64::consts::PI;

/// Half of [`PI`].
pub const HALF_PI: f64 = std::f64::consts::FRAC_PI_2;
