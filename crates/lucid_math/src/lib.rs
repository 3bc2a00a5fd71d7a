//! # Lucid Math
//!
//! Stateless math helpers:
//! - Extrema, Euclidean modulus, range tests, clamping
//! - Normalization, linear interpolation, range remapping
//! - Random angles, numbers and integers from an injected source
//! - Degree/radian conversion
//!
//! ## Example
//!
//! ```rust,ignore
//! use lucid_math::{clamp, remap, random_integer, SharedRng};
//!
//! assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
//! assert_eq!(remap(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
//!
//! let mut rng = SharedRng::from_seed(42);
//! let roll = random_integer(&mut rng, 1.0, 6.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod constants;
pub mod module;
pub mod random;
pub mod scalar;

pub use constants::{HALF_PI, PI, TAU};
pub use module::math_module;
pub use random::{
    random_angle_radians, random_integer, random_number, DefaultRng, SharedRng, UniformSource,
};
pub use scalar::{
    clamp, degrees_to_radians, euclidean_mod, is_between, is_between_inclusive, lerp, max_of,
    min_of, normalize, radians_to_degrees, remap,
};
