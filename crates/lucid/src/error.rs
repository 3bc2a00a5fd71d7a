//! # Lucid Error Types

use std::path::PathBuf;

use lucid_meta::MetaError;
use thiserror::Error;

/// Errors raised while configuring or installing Lucid.
#[derive(Error, Debug)]
pub enum LucidError {
    /// Namespace registration or object annotation failed.
    #[error(transparent)]
    Meta(#[from] MetaError),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`LucidConfig`](crate::LucidConfig).
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for Lucid operations.
pub type LucidResult<T> = Result<T, LucidError>;
