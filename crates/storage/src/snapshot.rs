//! StoreSnapshot: point-in-time view of every column space
//!
//! A snapshot holds `Arc`s to the column-space maps that were current when
//! it was taken. Writers never mutate a map a snapshot can see; they clone it
//! first (see `ColumnStore`). Snapshots are therefore immutable and cheap to
//! clone and share across threads.

use std::sync::Arc;

use mira_core::{ColumnRead, ColumnSpace, Error, Result};

use crate::cursor::StoreCursor;
use crate::store::SpaceMap;
use crate::view::ReadView;

/// Immutable point-in-time view of a `ColumnStore`
///
/// # Example
///
/// ```ignore
/// let store = ColumnStore::new(1);
/// let snapshot = store.snapshot();
///
/// // Writes after snapshot creation are not visible in snapshot
/// store.put(space, key.clone(), value)?;
/// assert!(snapshot.get(space, &key)?.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// Store version at which this snapshot was taken
    version: u64,
    /// Column-space maps as of `version`
    spaces: Arc<Vec<Arc<SpaceMap>>>,
}

impl StoreSnapshot {
    pub(crate) fn new(version: u64, spaces: Vec<Arc<SpaceMap>>) -> Self {
        Self {
            version,
            spaces: Arc::new(spaces),
        }
    }

    pub(crate) fn space_map(&self, space: ColumnSpace) -> Result<Arc<SpaceMap>> {
        self.spaces
            .get(space.index())
            .cloned()
            .ok_or(Error::ColumnSpaceOutOfRange {
                index: space.index(),
                count: self.spaces.len(),
            })
    }
}

impl ColumnRead for StoreSnapshot {
    type Cursor = StoreCursor;

    fn column_spaces(&self) -> usize {
        self.spaces.len()
    }

    fn cursor(&self, space: ColumnSpace) -> Result<StoreCursor> {
        StoreCursor::open(ReadView::Pinned(self.clone()), space)
    }

    fn get(&self, space: ColumnSpace, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.space_map(space)?.get(key).map(|v| v.to_vec()))
    }

    fn version(&self) -> u64 {
        self.version
    }
}
