//! StoreCursor: raw seek/step cursor over one column space
//!
//! The cursor remembers its current entry (key and shared value bytes) and
//! repositions relative to that key. For a pinned view the column space never
//! changes underneath it; for a live view each operation re-reads the latest
//! column space, so a step after a concurrent delete of the current key still
//! lands on the correct neighbour.
//!
//! # Cost
//!
//! Seeks are O(log n). Forward steps over a pinned view read ahead
//! `READ_AHEAD` entries per lookup, so a forward scan costs O(1) amortized per
//! step. Backward steps, and every step over a live view, re-seek from the
//! current key in O(log n), since a live column space may change between
//! steps.

use std::collections::VecDeque;
use std::ops::Bound;
use std::sync::Arc;

use mira_core::{ColumnSpace, RawCursor, Result};

use crate::store::{ColumnStore, SpaceMap};
use crate::view::ReadView;

/// Entries buffered per forward lookup on a pinned view
pub const READ_AHEAD: usize = 32;

type Entry = (Vec<u8>, Arc<[u8]>);

/// Where the cursor reads its column space from
#[derive(Debug, Clone)]
enum Source {
    /// Resolved once at open
    Pinned(Arc<SpaceMap>),
    /// Re-read on every operation
    Live(Arc<ColumnStore>),
}

/// Raw cursor over one column space of a `ReadView`
#[derive(Debug)]
pub struct StoreCursor {
    view: ReadView,
    space: ColumnSpace,
    source: Source,
    /// Current entry, `None` when invalid
    current: Option<Entry>,
    /// Entries following `current`; only filled for pinned views
    ahead: VecDeque<Entry>,
}

impl StoreCursor {
    /// Open an unpositioned cursor
    ///
    /// # Errors
    ///
    /// Returns `ColumnSpaceOutOfRange` if `space` is not part of the view.
    pub fn open(view: ReadView, space: ColumnSpace) -> Result<Self> {
        let map = view.space_map(space)?;
        let source = match &view {
            ReadView::Pinned(_) => Source::Pinned(map),
            ReadView::Live(store) => Source::Live(Arc::clone(store)),
        };
        Ok(Self {
            view,
            space,
            source,
            current: None,
            ahead: VecDeque::new(),
        })
    }

    /// Independent, unpositioned cursor over the same view and column space
    pub fn reopen(&self) -> Self {
        Self {
            view: self.view.clone(),
            space: self.space,
            source: self.source.clone(),
            current: None,
            ahead: VecDeque::new(),
        }
    }

    /// The view this cursor reads through
    pub fn view(&self) -> &ReadView {
        &self.view
    }

    /// The column space this cursor traverses
    pub fn space(&self) -> ColumnSpace {
        self.space
    }

    fn map(&self) -> Arc<SpaceMap> {
        match &self.source {
            Source::Pinned(map) => Arc::clone(map),
            // Range checked at open; a store's column spaces are fixed
            Source::Live(store) => store.live_space(self.space),
        }
    }

    fn batch(&self) -> usize {
        match self.source {
            Source::Pinned(_) => READ_AHEAD,
            Source::Live(_) => 1,
        }
    }

    fn entry((key, value): (&Vec<u8>, &Arc<[u8]>)) -> Entry {
        (key.clone(), Arc::clone(value))
    }

    fn position(&mut self, entry: Option<Entry>) {
        self.ahead.clear();
        self.current = entry;
    }
}

impl RawCursor for StoreCursor {
    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn seek_to_first(&mut self) {
        let first = self.map().iter().next().map(Self::entry);
        self.position(first);
    }

    fn seek_to_last(&mut self) {
        let last = self.map().iter().next_back().map(Self::entry);
        self.position(last);
    }

    fn seek(&mut self, target: &[u8]) {
        let found = self
            .map()
            .range::<[u8], _>((Bound::Included(target), Bound::Unbounded))
            .next()
            .map(Self::entry);
        self.position(found);
    }

    fn seek_for_prev(&mut self, target: &[u8]) {
        let found = self
            .map()
            .range::<[u8], _>((Bound::Unbounded, Bound::Included(target)))
            .next_back()
            .map(Self::entry);
        self.position(found);
    }

    fn next(&mut self) {
        if let Some(entry) = self.ahead.pop_front() {
            self.current = Some(entry);
            return;
        }
        let batch: Vec<Entry> = match &self.current {
            Some((key, _)) => self
                .map()
                .range::<[u8], _>((Bound::Excluded(key.as_slice()), Bound::Unbounded))
                .take(self.batch())
                .map(Self::entry)
                .collect(),
            None => return,
        };
        let mut batch = batch.into_iter();
        self.current = batch.next();
        self.ahead.extend(batch);
    }

    fn prev(&mut self) {
        let prev = match &self.current {
            Some((key, _)) => self
                .map()
                .range::<[u8], _>((Bound::Unbounded, Bound::Excluded(key.as_slice())))
                .next_back()
                .map(Self::entry),
            None => None,
        };
        self.position(prev);
    }

    fn key(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|(key, _)| key.as_slice())
    }

    fn value(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|(_, value)| &**value)
    }

    fn invalidate(&mut self) {
        self.position(None);
    }
}
