//! # Catalog Configuration
//!
//! Settings are read from TOML and may be overridden from the environment:
//!
//! - `OSINFO_DUPLICATE_EDGES`: `reject` (default) or `ignore`; what the
//!   relationship graph does when the same edge is inserted twice.
//!
//! ```toml
//! duplicate_edges = "ignore"
//! ```

use crate::CatalogError;
use crate::relationship::DuplicateEdgePolicy;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Environment variable overriding [`CatalogConfig::duplicate_edges`].
pub const DUPLICATE_EDGES_ENV: &str = "OSINFO_DUPLICATE_EDGES";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub duplicate_edges: DuplicateEdgePolicy,
}

impl CatalogConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        toml::from_str(text).map_err(|e| CatalogError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::IoError(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "catalog config loaded");
        Ok(config)
    }

    /// Apply `OSINFO_DUPLICATE_EDGES` when it is set.
    pub fn with_env_overrides(self) -> Result<Self, CatalogError> {
        let value = std::env::var(DUPLICATE_EDGES_ENV).ok();
        self.apply_override(value.as_deref())
    }

    /// Apply an override value for the duplicate edge policy.
    ///
    /// `None` and blank strings leave the config unchanged.
    pub fn apply_override(mut self, duplicate_edges: Option<&str>) -> Result<Self, CatalogError> {
        if let Some(raw) = duplicate_edges.filter(|raw| !raw.trim().is_empty()) {
            self.duplicate_edges = raw.parse()?;
            debug!(policy = self.duplicate_edges.as_str(), "duplicate edge policy overridden");
        }
        Ok(self)
    }
}
