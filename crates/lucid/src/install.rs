//! # Installer
//!
//! Defines the root object on the host's global object:
//!
//! ```text
//! LUCID
//! ├── VERSION   (constant)
//! ├── meta      is_assigned, first_assigned, define_global_once, ...
//! └── math      TAU, PI, HALF_PI (constants), min_of, clamp, remap, ...
//! ```
//!
//! Installing is idempotent: a second call returns the existing root object
//! and builds nothing.

use std::cell::Cell;

use lucid_math::math_module;
use lucid_meta::{GlobalObject, ObjectRef, PropertyBag, Value};

use crate::config::LucidConfig;
use crate::error::LucidResult;
use crate::meta::meta_module;

/// Library version exposed as `LUCID.VERSION`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

impl LucidConfig {
    /// Creates an empty global object using the configured self-alias.
    #[must_use]
    pub fn new_global(&self) -> GlobalObject {
        self.global_alias
            .as_ref()
            .map_or_else(GlobalObject::new, GlobalObject::with_alias)
    }
}

/// Installs the root object at `config.namespace` and returns it.
///
/// # Errors
///
/// `InvalidNamespace` for an empty namespace leaf, `NotAnObject` if the
/// namespace (or one of its nodes) is already taken by a non-object value.
pub fn install(global: &GlobalObject, config: &LucidConfig) -> LucidResult<ObjectRef> {
    let built = Cell::new(false);

    let root = global.define_object_once(&config.namespace, || {
        built.set(true);

        let mut root: PropertyBag = [
            ("VERSION", Value::from(VERSION)),
            ("meta", Value::from(meta_module(global)?)),
            ("math", Value::from(math_module(config.random.build())?)),
        ]
        .into_iter()
        .collect();
        root.lock_constants()?;

        Ok(root)
    })?;

    if built.get() {
        tracing::info!("lucid {} installed at {}", VERSION, config.namespace);
    } else {
        tracing::debug!("lucid already installed at {}", config.namespace);
    }

    Ok(root)
}
