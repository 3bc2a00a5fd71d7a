//! # Meta Error Types
//!
//! All errors that can occur while registering namespaces or annotating objects.

use thiserror::Error;

/// Errors that can occur in the meta layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    /// The namespace path has an empty leaf segment (`""`, `"A."`).
    #[error("invalid namespace or object name: {path:?}")]
    InvalidNamespace {
        /// The rejected path.
        path: String,
    },

    /// An intermediate namespace segment holds a value that is not an object.
    #[error("cannot descend into {segment:?} of {path:?}: value is a {found}")]
    NotAnObject {
        /// The segment that could not be descended into.
        segment: String,
        /// The full path being registered.
        path: String,
        /// Type name of the value found there.
        found: &'static str,
    },

    /// Assignment to a constant or to an accessor without a setter.
    #[error("cannot assign to read-only property {key:?}")]
    ReadOnly {
        /// The property key.
        key: String,
    },

    /// Redefinition or deletion of a non-configurable property.
    #[error("cannot redefine non-configurable property {key:?}")]
    NonConfigurable {
        /// The property key.
        key: String,
    },

    /// A property key was given as an object or a function.
    #[error("property key must be a primitive value (got {found})")]
    InvalidKey {
        /// Type name of the value supplied.
        found: &'static str,
    },

    /// A callable was required but something else was supplied.
    #[error("{what} is not a function (got {found})")]
    NotCallable {
        /// What was expected to be callable.
        what: String,
        /// Type name of the value supplied.
        found: &'static str,
    },
}

/// Result type for meta operations.
pub type MetaResult<T> = Result<T, MetaError>;
