//! # Lucid Meta
//!
//! Meta-programming helpers for Lucid:
//! - A dynamic value model (`Value`, `ObjectRef`, `NativeFunction`)
//! - Property bags with constant and accessor properties
//! - A namespace registrar that installs values at dotted paths once
//!
//! ## Example
//!
//! ```rust,ignore
//! use lucid_meta::{GlobalObject, PropertyBag, Value};
//!
//! let global = GlobalObject::with_alias("window");
//! let lucid = global.define_once("LUCID", || PropertyBag::new().into())?;
//!
//! // Second call reuses the existing object, the factory is not run.
//! assert_eq!(global.define_once("LUCID", || Value::Null)?, lucid);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod assigned;
pub mod error;
pub mod namespace;
pub mod object;
pub mod value;

pub use assigned::{first_assigned, is_assigned, Assigned};
pub use error::{MetaError, MetaResult};
pub use namespace::{GlobalObject, NamespacePath, WeakGlobal};
pub use object::{
    is_constant_key, Accessor, Getter, ObjectRef, Property, PropertyBag, Setter,
    WeakObjectRef,
};
pub use value::{NativeFunction, Value};
