//! Index configuration via `mira.toml`
//!
//! The column-space layout (which index lives where, which one is primary),
//! the cursor read mode and the identity cache settings are fixed for the
//! lifetime of a `MultiIndex`. They are supplied by the caller, either built
//! in code or loaded from a TOML file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use mira_concurrency::CacheConfig;
use mira_core::{Error, ReadMode, Result};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "mira.toml";

/// Multi-index configuration.
///
/// # Example
///
/// ```toml
/// # Index names in column-space order
/// column_spaces = ["by_id", "by_name", "by_age"]
///
/// # Column space holding full records (default 0)
/// primary = 0
///
/// # "snapshot" (default) or "live"
/// read_mode = "snapshot"
///
/// [cache]
/// retain_recent = 1024
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Index names, position = column space
    pub column_spaces: Vec<String>,
    /// Column space of the primary index
    #[serde(default)]
    pub primary: usize,
    /// How cursors observe concurrent writes
    #[serde(default)]
    pub read_mode: ReadMode,
    /// Identity cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl IndexConfig {
    /// Config with the given index names and defaults for everything else
    pub fn new<S: Into<String>>(column_spaces: impl IntoIterator<Item = S>) -> Self {
        Self {
            column_spaces: column_spaces.into_iter().map(Into::into).collect(),
            primary: 0,
            read_mode: ReadMode::default(),
            cache: CacheConfig::default(),
        }
    }

    /// Set the primary column space
    pub fn with_primary(mut self, primary: usize) -> Self {
        self.primary = primary;
        self
    }

    /// Set the cursor read mode
    pub fn with_read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    /// Set the identity cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Check the layout is usable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if there are no column spaces, a name is empty
    /// or repeated, or `primary` is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.column_spaces.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one column space is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.column_spaces {
            if name.is_empty() {
                return Err(Error::InvalidConfig("index names must not be empty".to_string()));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "index '{}' is listed more than once",
                    name
                )));
            }
        }

        if self.primary >= self.column_spaces.len() {
            return Err(Error::InvalidConfig(format!(
                "primary column space {} out of range ({} column spaces)",
                self.primary,
                self.column_spaces.len()
            )));
        }

        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| Error::InvalidConfig(format!("{}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::InvalidConfig(format!("{}", e)))
    }

    /// Commented template for a new config file.
    pub fn default_toml() -> &'static str {
        r#"# Mira index configuration
#
# Index names in column-space order. Each name must match the NAME of an
# IndexSpec used to open a view on it.
column_spaces = ["primary"]

# Column space holding full serialized records (default 0).
# Every other column space maps a secondary key to a primary key.
primary = 0

# Read mode: "snapshot" (default) or "live"
#   "snapshot" = each cursor pins a point-in-time view when positioned
#   "live"     = each cursor step reads the latest committed state
read_mode = "snapshot"

[cache]
# Recently materialized records kept alive by the identity cache (0 disables)
retain_recent = 1024
"#
    }
}
