//! Configuration loading from warden.toml.

use acl::{Gate, Permission, PermissionCatalog, Rules};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Path to a permission catalog file (`.json` or `.toml`).
    /// Mutually exclusive with inline `permissions`.
    pub catalog: Option<PathBuf>,

    /// Inline permission catalog.
    #[serde(default)]
    pub permissions: Vec<Permission>,

    /// Derivation rules; unset fields keep their defaults.
    #[serde(default)]
    pub rules: Rules,

    /// Gates declared per route path.
    #[serde(default)]
    pub routes: BTreeMap<String, Gate>,

    /// Directory relative catalog paths resolve against.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Create a default configuration: no catalog, default rules, no routes.
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Build the permission catalog from config.
    ///
    /// At most one of `catalog` or `permissions` may be set; neither
    /// yields an empty catalog.
    pub fn catalog(&self) -> Result<PermissionCatalog, ConfigError> {
        match (&self.catalog, self.permissions.is_empty()) {
            (Some(path), true) => Ok(PermissionCatalog::load(self.base_dir.join(path))?),
            (None, _) => Ok(PermissionCatalog::new(self.permissions.clone())),
            (Some(_), false) => Err(ConfigError::AmbiguousCatalog),
        }
    }

    /// The gate declared for `route`, or the full-access default.
    pub fn gate_for(&self, route: &str) -> Gate {
        match self.routes.get(route) {
            Some(gate) => gate.clone(),
            None => {
                tracing::debug!(route, "no gate declared, requiring full access");
                Gate::default()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] acl::Error),

    #[error("ambiguous catalog: set either catalog OR [[permissions]], not both")]
    AmbiguousCatalog,
}
