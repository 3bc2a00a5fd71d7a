//! # Random Helpers
//!
//! Every helper draws from a [`UniformSource`], a generator of values in
//! `[0, 1)`. Any `rand` generator is a source; [`SharedRng`] is the one the
//! `math` module object uses.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constants::TAU;
use crate::scalar::lerp;

/// A source of uniformly distributed values in `[0, 1)`.
pub trait UniformSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UniformSource for R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Random angle in `[0, TAU)`.
#[inline]
pub fn random_angle_radians<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    source.next_unit() * TAU
}

/// Random number in `[lo, hi)`.
#[inline]
pub fn random_number<S: UniformSource + ?Sized>(source: &mut S, lo: f64, hi: f64) -> f64 {
    lerp(source.next_unit(), lo, hi)
}

/// Random whole number drawn from `[lo, hi + 1)` and truncated toward zero.
///
/// With integer bounds the result lies in `[lo, hi]`. Fractional bounds are
/// not rounded first: `(1.5, 3.5)` draws from `[1.5, 4.5)` and yields 1 to 4.
/// For ranges that reach below zero the truncation folds `(-1, 0)` onto `0`.
#[inline]
pub fn random_integer<S: UniformSource + ?Sized>(source: &mut S, lo: f64, hi: f64) -> f64 {
    random_number(source, lo, hi + 1.0).trunc()
}

/// Generator used by the module object.
pub type DefaultRng = ChaCha8Rng;

/// A [`DefaultRng`] shared between closures.
#[derive(Clone)]
pub struct SharedRng(Arc<Mutex<DefaultRng>>);

impl SharedRng {
    /// Deterministic generator: the same seed gives the same sequence.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        tracing::debug!("random source seeded with {}", seed);
        Self::wrap(DefaultRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        tracing::debug!("random source seeded from OS entropy");
        Self::wrap(DefaultRng::from_entropy())
    }

    /// Seeded when `seed` is given, from entropy otherwise.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }

    fn wrap(rng: DefaultRng) -> Self {
        Self(Arc::new(Mutex::new(rng)))
    }

    /// Next value in `[0, 1)`.
    #[must_use]
    pub fn unit(&self) -> f64 {
        self.0.lock().next_unit()
    }
}

impl UniformSource for SharedRng {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.unit()
    }
}

impl fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedRng")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of unit values.
    struct Replay(Vec<f64>, usize);

    impl UniformSource for Replay {
        fn next_unit(&mut self) -> f64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    const JUST_BELOW_ONE: f64 = 1.0 - f64::EPSILON;

    #[test]
    fn test_random_integer_single_value_range() {
        let mut rng = DefaultRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(random_integer(&mut rng, 1.0, 1.0), 1.0);
        }
    }

    #[test]
    fn test_random_integer_hits_both_ends() {
        let mut source = Replay(vec![0.0, JUST_BELOW_ONE], 0);
        assert_eq!(random_integer(&mut source, 3.0, 6.0), 3.0);
        assert_eq!(random_integer(&mut source, 3.0, 6.0), 6.0);
    }

    #[test]
    fn test_random_integer_fractional_bounds() {
        let mut source = Replay(vec![0.0, JUST_BELOW_ONE], 0);
        assert_eq!(random_integer(&mut source, 1.5, 3.5), 1.0);
        assert_eq!(random_integer(&mut source, 1.5, 3.5), 4.0);

        let mut rng = DefaultRng::seed_from_u64(42);
        let mut seen = [false; 5];
        for _ in 0..5000 {
            let n = random_integer(&mut rng, 1.5, 3.5);
            assert!((1.0..=4.0).contains(&n), "{n} out of range");
            assert_eq!(n, n.trunc());
            seen[n as usize] = true;
        }
        assert_eq!(seen, [false, true, true, true, true]);
    }

    #[test]
    fn test_random_integer_stays_in_range() {
        let mut rng = DefaultRng::seed_from_u64(11);
        let mut seen = [false; 5];
        for _ in 0..2000 {
            let n = random_integer(&mut rng, 0.0, 4.0);
            assert!((0.0..=4.0).contains(&n));
            seen[n as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_number_range() {
        let mut source = Replay(vec![0.0, 0.5, JUST_BELOW_ONE], 0);
        assert_eq!(random_number(&mut source, -2.0, 2.0), -2.0);
        assert_eq!(random_number(&mut source, -2.0, 2.0), 0.0);
        assert!(random_number(&mut source, -2.0, 2.0) < 2.0);

        let mut rng = DefaultRng::seed_from_u64(3);
        for _ in 0..1000 {
            let x = random_number(&mut rng, 10.0, 20.0);
            assert!((10.0..20.0).contains(&x));
        }
    }

    #[test]
    fn test_random_angle() {
        let mut source = Replay(vec![0.0, 0.5], 0);
        assert_eq!(random_angle_radians(&mut source), 0.0);
        assert_eq!(random_angle_radians(&mut source), std::f64::consts::PI);

        let mut rng = DefaultRng::seed_from_u64(5);
        for _ in 0..1000 {
            let angle = random_angle_radians(&mut rng);
            assert!((0.0..TAU).contains(&angle));
        }
    }

    #[test]
    fn test_shared_rng_is_deterministic_per_seed() {
        let a = SharedRng::from_seed(42);
        let b = SharedRng::from_seed(42);
        let first: Vec<f64> = (0..8).map(|_| a.unit()).collect();
        let second: Vec<f64> = (0..8).map(|_| b.unit()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_rng_clones_share_state() {
        let a = SharedRng::from_seed(1);
        let fresh = SharedRng::from_seed(1);
        let b = a.clone();

        let x = a.unit();
        let y = b.unit();
        assert_eq!(x, fresh.unit());
        assert_eq!(y, fresh.unit());
        assert_ne!(x, y);
    }
}
