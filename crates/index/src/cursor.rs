//! Cursor: a typed position within one index
//!
//! A cursor wraps a raw store cursor over the index's column space and knows
//! how to dereference its entry (see [`Resolution`]). It owns no record data:
//! dereferencing returns a shared handle from the identity cache.
//!
//! # Semantics
//!
//! - **Positioning** (`begin`, `end`, `find`, bounds) happens through
//!   [`IndexView`](crate::IndexView); every positioning call opens a fresh
//!   read view in the configured [`ReadMode`].
//! - **Copy** (`Clone`) opens an independent raw cursor on the same read view
//!   and seeks it to the source's key. Advancing the copy never moves the
//!   source.
//! - **Move** is a Rust move; the source binding is unusable afterwards.
//! - **Equality** is defined only between cursors of the same index type:
//!   both invalid, or both valid with byte-identical keys.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::error;

use mira_core::{
    BincodeCodec, ColumnRead, ColumnSpace, Error, IndexSpec, RawCursor, ReadMode, Record,
    RecordCodec, Result,
};
use mira_storage::{ReadView, StoreCursor};

use crate::container::Context;
use crate::resolver::Resolution;

/// Position within index `I` over records `R`
pub struct Cursor<R: Record, I: IndexSpec<R>, C: RecordCodec = BincodeCodec> {
    context: Arc<Context<R, C>>,
    space: ColumnSpace,
    resolution: Resolution,
    raw: StoreCursor,
    _index: PhantomData<fn() -> I>,
}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> Cursor<R, I, C> {
    /// Unpositioned cursor over `space`, reading through `view`
    pub(crate) fn open(
        context: Arc<Context<R, C>>,
        space: ColumnSpace,
        resolution: Resolution,
        view: ReadView,
    ) -> Result<Self> {
        let raw = view.cursor(space)?;
        Ok(Self {
            context,
            space,
            resolution,
            raw,
            _index: PhantomData,
        })
    }

    pub(crate) fn seek_to_first(mut self) -> Self {
        self.raw.seek_to_first();
        self
    }

    pub(crate) fn seek_to_last(mut self) -> Self {
        self.raw.seek_to_last();
        self
    }

    /// Exact match or `end`
    pub(crate) fn seek_exact(mut self, key: &[u8]) -> Self {
        self.raw.seek(key);
        if self.raw.key() != Some(key) {
            self.raw.invalidate();
        }
        self
    }

    /// First key >= `key`, or `end`
    pub(crate) fn seek_lower(mut self, key: &[u8]) -> Self {
        self.raw.seek(key);
        self
    }

    /// First key > `key`, or `end`
    pub(crate) fn seek_upper(mut self, key: &[u8]) -> Self {
        self.raw.seek_for_prev(key);
        if self.raw.valid() {
            self.raw.next();
        } else {
            // Every key is greater than `key`
            self.raw.seek_to_first();
        }
        self
    }

    /// Whether the cursor denotes an entry (false for `end`)
    pub fn valid(&self) -> bool {
        self.raw.valid()
    }

    /// Raw key bytes of the current entry
    pub fn key_bytes(&self) -> Option<&[u8]> {
        self.raw.key()
    }

    /// Column space this cursor traverses
    pub fn space(&self) -> ColumnSpace {
        self.space
    }

    /// Name of the index this cursor traverses
    pub fn index_name(&self) -> &'static str {
        I::NAME
    }

    /// Read mode of the view this cursor reads through
    pub fn read_mode(&self) -> ReadMode {
        self.raw.view().mode()
    }

    /// Store version this cursor observes
    ///
    /// Fixed for snapshot cursors; the latest committed version for live ones.
    pub fn snapshot_version(&self) -> u64 {
        self.raw.view().version()
    }

    /// Step to the next key in sort order.
    ///
    /// Stepping past the last key makes the cursor invalid (`end`).
    ///
    /// # Panics
    ///
    /// Panics if the cursor is invalid.
    pub fn advance(&mut self) {
        assert!(
            self.valid(),
            "advance on invalid cursor over index '{}'",
            I::NAME
        );
        self.raw.next();
    }

    /// Step to the previous key in sort order.
    ///
    /// Stepping before the first key makes the cursor invalid (`end`).
    ///
    /// # Panics
    ///
    /// Panics if the cursor is invalid.
    pub fn retreat(&mut self) {
        assert!(
            self.valid(),
            "retreat on invalid cursor over index '{}'",
            I::NAME
        );
        self.raw.prev();
    }

    /// Dereference, returning invariant violations as errors.
    ///
    /// Repeated calls at the same position return the same shared handle
    /// (as long as some holder keeps it alive) and never move the cursor.
    ///
    /// # Errors
    ///
    /// - `InvalidCursor` if the cursor does not denote an entry
    /// - `DanglingSecondary` / `Corruption` if the store is inconsistent
    ///
    /// All of these are fatal; see [`Cursor::get`].
    pub fn try_get(&self) -> Result<Arc<R>> {
        let value = self.raw.value().ok_or_else(|| {
            Error::InvalidCursor(format!("dereference of end cursor over index '{}'", I::NAME))
        })?;
        self.resolution.resolve(
            self.space,
            value,
            self.raw.view(),
            &self.context.cache,
            &self.context.codec,
        )
    }

    /// Dereference to the shared record.
    ///
    /// # Panics
    ///
    /// Panics on any invariant violation: dereferencing `end`, a secondary
    /// entry with no primary record, or undecodable record bytes. The view of
    /// the store is inconsistent at that point and iteration must not go on.
    pub fn get(&self) -> Arc<R> {
        match self.try_get() {
            Ok(record) => record,
            Err(e) => {
                error!(
                    target: "mira::index",
                    index = I::NAME,
                    space = %self.space,
                    error = %e,
                    "Fatal cursor dereference"
                );
                panic!("fatal dereference on index '{}': {}", I::NAME, e);
            }
        }
    }
}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> Clone for Cursor<R, I, C> {
    fn clone(&self) -> Self {
        let mut raw = self.raw.reopen();
        if let Some(key) = self.raw.key() {
            raw.seek(key);
        }
        Self {
            context: Arc::clone(&self.context),
            space: self.space,
            resolution: self.resolution,
            raw,
            _index: PhantomData,
        }
    }
}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> PartialEq for Cursor<R, I, C> {
    fn eq(&self, other: &Self) -> bool {
        // Full byte comparison; keys of one index need not share a length
        match (self.raw.key(), other.raw.key()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> Eq for Cursor<R, I, C> {}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> fmt::Debug for Cursor<R, I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &I::NAME)
            .field("space", &self.space)
            .field("resolution", &self.resolution)
            .field("key", &self.raw.key())
            .finish()
    }
}
