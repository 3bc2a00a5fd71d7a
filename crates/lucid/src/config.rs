//! # Configuration
//!
//! Loaded once at startup, before [`install`](crate::install).
//!
//! ```toml
//! namespace = "LUCID"
//! global_alias = "window"
//!
//! [random]
//! seed = 42
//! ```
//!
//! Every field is optional; see [`LucidConfig::default`].

use std::path::Path;

use lucid_math::SharedRng;
use serde::{Deserialize, Serialize};

use crate::error::{LucidError, LucidResult};

/// Default namespace the root object is installed under.
pub const DEFAULT_NAMESPACE: &str = "LUCID";

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_owned()
}

/// Random source settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RandomConfig {
    /// Fixed seed for reproducible sequences. OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RandomConfig {
    /// Builds the generator described by this section.
    #[must_use]
    pub fn build(&self) -> SharedRng {
        SharedRng::new(self.seed)
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LucidConfig {
    /// Dotted path the root object is installed at.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Name under which the global object refers to itself (`window`).
    #[serde(default)]
    pub global_alias: Option<String>,

    /// Random source settings.
    #[serde(default)]
    pub random: RandomConfig,
}

impl Default for LucidConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            global_alias: None,
            random: RandomConfig::default(),
        }
    }
}

impl LucidConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> LucidResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> LucidResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LucidError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&source)?;
        tracing::info!("config loaded from {}", path.display());
        Ok(config)
    }

    /// Sets the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the global self-alias.
    #[must_use]
    pub fn with_global_alias(mut self, alias: impl Into<String>) -> Self {
        self.global_alias = Some(alias.into());
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random.seed = Some(seed);
        self
    }
}
