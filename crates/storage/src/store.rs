//! ColumnStore: ordered column spaces with version management
//!
//! This module implements the store collaborator using:
//! - `BTreeMap<Vec<u8>, Arc<[u8]>>` per column space for bytewise key order
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for monotonically increasing version numbers
//!
//! # Design Notes
//!
//! - **Fixed layout**: The number of column spaces is set at construction and
//!   never changes. Cursors rely on this to index column spaces directly.
//! - **Copy-on-write**: Column spaces are `Arc`-shared with snapshots. A write
//!   clones a column space only if a snapshot still holds the old one.
//! - **Version allocation under the write lock**: A snapshot that takes the
//!   read lock always sees data and version that agree.
//!
//! The write methods here are the store's own primitives. The index layer
//! never calls them; they exist for whatever write path populates the store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use mira_core::{ColumnSpace, Error, ReadMode, Result};

use crate::snapshot::StoreSnapshot;
use crate::view::ReadView;

/// One column space: bytewise-ordered keys to shared value bytes
pub(crate) type SpaceMap = BTreeMap<Vec<u8>, Arc<[u8]>>;

/// A single store write, applied atomically with others via `apply_batch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Insert or overwrite a key
    Put {
        /// Target column space
        space: ColumnSpace,
        /// Key bytes
        key: Vec<u8>,
        /// Value bytes
        value: Vec<u8>,
    },

    /// Remove a key if present
    Delete {
        /// Target column space
        space: ColumnSpace,
        /// Key bytes
        key: Vec<u8>,
    },
}

impl WriteOp {
    fn space(&self) -> ColumnSpace {
        match self {
            WriteOp::Put { space, .. } | WriteOp::Delete { space, .. } => *space,
        }
    }
}

/// In-memory store of ordered column spaces
///
/// Thread-safe through `parking_lot::RwLock` and `AtomicU64`.
#[derive(Debug)]
pub struct ColumnStore {
    /// One ordered map per column space
    spaces: RwLock<Vec<Arc<SpaceMap>>>,
    /// Global version counter, bumped once per write or batch
    version: AtomicU64,
}

impl ColumnStore {
    /// Create a store with `column_spaces` empty column spaces
    ///
    /// Initial version is 0 (no writes have occurred).
    pub fn new(column_spaces: usize) -> Self {
        Self {
            spaces: RwLock::new((0..column_spaces).map(|_| Arc::default()).collect()),
            version: AtomicU64::new(0),
        }
    }

    /// Number of column spaces
    pub fn column_spaces(&self) -> usize {
        self.spaces.read().len()
    }

    /// Highest version assigned so far
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    fn check_space(space: ColumnSpace, count: usize) -> Result<()> {
        if space.index() < count {
            Ok(())
        } else {
            Err(Error::ColumnSpaceOutOfRange {
                index: space.index(),
                count,
            })
        }
    }

    /// Put a key-value pair into a column space
    ///
    /// Returns the version assigned to this write.
    pub fn put(&self, space: ColumnSpace, key: Vec<u8>, value: Vec<u8>) -> Result<u64> {
        self.apply_batch(&[WriteOp::Put { space, key, value }])
    }

    /// Delete a key from a column space
    ///
    /// Returns the removed value bytes, if the key existed.
    pub fn delete(&self, space: ColumnSpace, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let mut spaces = self.spaces.write();
        Self::check_space(space, spaces.len())?;

        let map = Arc::make_mut(&mut spaces[space.index()]);
        let removed = map.remove(key);
        if removed.is_some() {
            self.version.fetch_add(1, Ordering::SeqCst);
        }

        Ok(removed.map(|v| v.to_vec()))
    }

    /// Apply a batch of writes atomically
    ///
    /// Every op is validated before any is applied, and all ops are applied
    /// under a single write lock acquisition with a single version. No
    /// snapshot can observe a partial batch.
    pub fn apply_batch(&self, ops: &[WriteOp]) -> Result<u64> {
        let mut spaces = self.spaces.write();
        let count = spaces.len();
        for op in ops {
            Self::check_space(op.space(), count)?;
        }

        for op in ops {
            match op {
                WriteOp::Put { space, key, value } => {
                    Arc::make_mut(&mut spaces[space.index()])
                        .insert(key.clone(), Arc::from(value.as_slice()));
                }
                WriteOp::Delete { space, key } => {
                    Arc::make_mut(&mut spaces[space.index()]).remove(key.as_slice());
                }
            }
        }

        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(target: "mira::storage", ops = ops.len(), version, "Applied batch");
        Ok(version)
    }

    /// Create a point-in-time snapshot of all column spaces
    ///
    /// O(column spaces): only the per-space `Arc`s are cloned.
    pub fn snapshot(&self) -> StoreSnapshot {
        // Read lock before version so the two agree (versions are bumped
        // under the write lock).
        let spaces = self.spaces.read();
        let version = self.current_version();
        StoreSnapshot::new(version, spaces.clone())
    }

    /// Open a read view in the requested mode
    pub fn read_view(self: &Arc<Self>, mode: ReadMode) -> ReadView {
        match mode {
            ReadMode::Snapshot => ReadView::Pinned(self.snapshot()),
            ReadMode::Live => ReadView::Live(Arc::clone(self)),
        }
    }

    /// Latest state of one column space
    pub(crate) fn space_map(&self, space: ColumnSpace) -> Result<Arc<SpaceMap>> {
        let spaces = self.spaces.read();
        spaces
            .get(space.index())
            .cloned()
            .ok_or(Error::ColumnSpaceOutOfRange {
                index: space.index(),
                count: spaces.len(),
            })
    }

    /// Latest state of a column space already checked against the layout
    ///
    /// # Panics
    ///
    /// Panics if `space` is out of range. The column space count is fixed at
    /// construction, so a space validated once stays valid.
    pub(crate) fn live_space(&self, space: ColumnSpace) -> Arc<SpaceMap> {
        Arc::clone(&self.spaces.read()[space.index()])
    }

    /// Point lookup against the latest state
    pub fn get(&self, space: ColumnSpace, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.space_map(space)?.get(key).map(|v| v.to_vec()))
    }

    /// Number of keys in a column space
    pub fn len(&self, space: ColumnSpace) -> Result<usize> {
        Ok(self.space_map(space)?.len())
    }
}
