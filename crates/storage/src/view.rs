//! ReadView: snapshot-pinned or live access to a ColumnStore

use std::sync::Arc;

use mira_core::{ColumnRead, ColumnSpace, ReadMode, Result};

use crate::cursor::StoreCursor;
use crate::snapshot::StoreSnapshot;
use crate::store::{ColumnStore, SpaceMap};

/// What a cursor reads through.
///
/// `Pinned` reads a fixed snapshot for its whole lifetime. `Live` re-reads
/// the latest committed column space on every operation.
#[derive(Debug, Clone)]
pub enum ReadView {
    /// Point-in-time view
    Pinned(StoreSnapshot),
    /// Latest committed state
    Live(Arc<ColumnStore>),
}

impl ReadView {
    /// Which read mode this view implements
    pub fn mode(&self) -> ReadMode {
        match self {
            ReadView::Pinned(_) => ReadMode::Snapshot,
            ReadView::Live(_) => ReadMode::Live,
        }
    }

    pub(crate) fn space_map(&self, space: ColumnSpace) -> Result<Arc<SpaceMap>> {
        match self {
            ReadView::Pinned(snapshot) => snapshot.space_map(space),
            ReadView::Live(store) => store.space_map(space),
        }
    }
}

impl ColumnRead for ReadView {
    type Cursor = StoreCursor;

    fn column_spaces(&self) -> usize {
        match self {
            ReadView::Pinned(snapshot) => snapshot.column_spaces(),
            ReadView::Live(store) => store.column_spaces(),
        }
    }

    fn cursor(&self, space: ColumnSpace) -> Result<StoreCursor> {
        StoreCursor::open(self.clone(), space)
    }

    fn get(&self, space: ColumnSpace, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.space_map(space)?.get(key).map(|v| v.to_vec()))
    }

    fn version(&self) -> u64 {
        match self {
            ReadView::Pinned(snapshot) => snapshot.version(),
            ReadView::Live(store) => store.current_version(),
        }
    }
}
