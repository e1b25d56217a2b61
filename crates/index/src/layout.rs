//! Column-space layout: which index lives in which column space

use mira_core::{ColumnSpace, Error, Result};

use crate::config::IndexConfig;
use crate::resolver::Resolution;

/// Validated mapping from index names to column spaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    names: Vec<String>,
    primary: ColumnSpace,
}

impl Layout {
    /// Build a layout from a configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn from_config(config: &IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            names: config.column_spaces.clone(),
            primary: ColumnSpace::new(config.primary),
        })
    }

    /// Column space of the primary index
    pub fn primary(&self) -> ColumnSpace {
        self.primary
    }

    /// Number of column spaces in the layout
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the layout has no column spaces (never true once validated)
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column space backing the index named `name`
    pub fn space_of(&self, name: &str) -> Result<ColumnSpace> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(ColumnSpace::new)
            .ok_or_else(|| Error::UnknownIndex(name.to_string()))
    }

    /// Name of the index in `space`
    pub fn name(&self, space: ColumnSpace) -> Option<&str> {
        self.names.get(space.index()).map(String::as_str)
    }

    /// How entries of `space` are dereferenced
    pub fn resolution(&self, space: ColumnSpace) -> Resolution {
        if space == self.primary {
            Resolution::Direct
        } else {
            Resolution::Indirect {
                primary: self.primary,
            }
        }
    }
}
