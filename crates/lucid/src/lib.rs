//! # Lucid
//!
//! A small utility library:
//! - **Namespaces**: install a value at a dotted path of a global object, once
//! - **Meta helpers**: constants, accessors and constant locking on plain objects
//! - **Math helpers**: clamping, interpolation, remapping, randomness, angles
//!
//! ## Architecture
//!
//! ```text
//! lucid_meta   values, property bags, namespace registrar
//! lucid_math   pure helpers + the `math` module object
//! lucid        config + the `meta` module object + install()
//! ```
//!
//! The global object is always passed in by the host. There is no hidden
//! process-wide singleton.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lucid::{install, LucidConfig};
//!
//! let config = LucidConfig::load("lucid.toml")?;
//! let global = config.new_global();
//! let lucid = install(&global, &config)?;
//!
//! let tau = global.resolve("LUCID.math.TAU")?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod install;
pub mod meta;

pub use config::{LucidConfig, RandomConfig, DEFAULT_NAMESPACE};
pub use error::{LucidError, LucidResult};
pub use install::{install, VERSION};
pub use meta::meta_module;

pub use lucid_math;
pub use lucid_meta;
