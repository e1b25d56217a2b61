//! Core types for Mira
//!
//! This module defines the foundational types:
//! - ColumnSpace: Index of one ordered key space inside the store
//! - ReadMode: How a cursor observes concurrent writes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of one ordered key→value mapping inside the store.
///
/// Every index (primary or secondary) owns exactly one column space.
/// Which column space is the primary is fixed configuration, not a property
/// of the number itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnSpace(usize);

impl ColumnSpace {
    /// Wrap a raw column space index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw column space index
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ColumnSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ColumnSpace {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// How a cursor observes the store.
///
/// - `Snapshot`: the cursor pins a point-in-time view when it is positioned
///   and reads only through it, including the indirect primary lookups of
///   secondary dereferences. Concurrent writes are never visible mid-traversal,
///   and a dereference yields the record version held by the snapshot even
///   if other cursors have materialized a different version of it.
/// - `Live`: every raw operation reads the latest committed state. A traversal
///   may observe a mix of pre- and post-write entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    /// Pin a snapshot at cursor construction (default)
    #[default]
    Snapshot,
    /// Read live, possibly-changing state
    Live,
}

impl fmt::Display for ReadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadMode::Snapshot => write!(f, "snapshot"),
            ReadMode::Live => write!(f, "live"),
        }
    }
}
