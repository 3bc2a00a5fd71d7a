//! # Scalar Helpers
//!
//! Pure functions over plain numbers. No state, no allocation, no errors:
//! out-of-domain inputs produce the usual IEEE-754 special values.
//!
//! `min_of`, `max_of`, `is_between*` and `clamp` only need `PartialOrd`, so
//! they work for integers as well as floats.

use crate::constants::TAU;

/// Returns the smallest value.
///
/// Scans first to last keeping the current minimum and replacing it only
/// when `value < min`. Comparisons with NaN are false, so a leading NaN is
/// kept and later NaNs are never picked.
///
/// # Panics
///
/// If `values` is empty.
#[must_use]
pub fn min_of<T: PartialOrd + Copy>(values: &[T]) -> T {
    let mut min = values[0];
    for &value in &values[1..] {
        if value < min {
            min = value;
        }
    }
    min
}

/// Returns the largest value. Mirror image of [`min_of`].
///
/// # Panics
///
/// If `values` is empty.
#[must_use]
pub fn max_of<T: PartialOrd + Copy>(values: &[T]) -> T {
    let mut max = values[0];
    for &value in &values[1..] {
        if value > max {
            max = value;
        }
    }
    max
}

/// Remainder of the Euclidean division, with the sign of `divisor`.
///
/// `%` truncates, so `-1.0 % 5.0 == -1.0`; this returns `4.0`.
#[inline]
#[must_use]
pub fn euclidean_mod(dividend: f64, divisor: f64) -> f64 {
    ((dividend % divisor) + divisor) % divisor
}

/// `lo < value < hi`.
#[inline]
#[must_use]
pub fn is_between<T: PartialOrd>(value: T, lo: T, hi: T) -> bool {
    value > lo && value < hi
}

/// `lo <= value <= hi`.
#[inline]
#[must_use]
pub fn is_between_inclusive<T: PartialOrd>(value: T, lo: T, hi: T) -> bool {
    value >= lo && value <= hi
}

/// Constrains `value` to `[lo, hi]`.
///
/// Computed as `min_of(max_of(value, lo), hi)`. Inverted bounds are not
/// special-cased: with `lo > hi` the result is `hi`.
#[inline]
#[must_use]
pub fn clamp<T: PartialOrd + Copy>(value: T, lo: T, hi: T) -> T {
    min_of(&[max_of(&[value, lo]), hi])
}

/// Position of `value` within `[lo, hi]`: 0 at `lo`, 1 at `hi`.
///
/// `lo == hi` yields infinity or NaN.
#[inline]
#[must_use]
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    (value - lo) / (hi - lo)
}

/// Linear interpolation between `lo` and `hi` at `t`.
#[inline]
#[must_use]
pub fn lerp(t: f64, lo: f64, hi: f64) -> f64 {
    (1.0 - t) * lo + t * hi
}

/// Maps `value` from `[from_lo, from_hi]` onto `[to_lo, to_hi]`.
#[inline]
#[must_use]
pub fn remap(value: f64, from_lo: f64, from_hi: f64, to_lo: f64, to_hi: f64) -> f64 {
    lerp(normalize(value, from_lo, from_hi), to_lo, to_hi)
}

/// Converts radians to degrees.
#[inline]
#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    (radians * 360.0) / TAU
}

/// Converts degrees to radians.
#[inline]
#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    (degrees * TAU) / 360.0
}
