//! IndexView: positioning calls over one index
//!
//! Every positioning call serializes its key with the container's codec,
//! opens a fresh read view and seeks a new cursor. Keys are compared
//! bytewise in their encoded form.
//!
//! | Call | Lands on |
//! |------|----------|
//! | `begin` | smallest key, or `end` if the index is empty |
//! | `end` | sentinel, never an entry |
//! | `last` | greatest key, or `end` if the index is empty |
//! | `find(k)` | exactly `k`, or `end` |
//! | `lower_bound(k)` | smallest key >= `k`, or `end` |
//! | `upper_bound(k)` | smallest key > `k`, or `end` |
//! | `range(lo, hi)` | `(lower_bound(lo), upper_bound(hi))` from one read view |

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use mira_core::{BincodeCodec, ColumnSpace, IndexSpec, Record, RecordCodec, Result};
use mira_storage::ReadView;

use crate::container::Context;
use crate::cursor::Cursor;
use crate::iter::Iter;
use crate::resolver::Resolution;

/// Positioning handle for index `I`
pub struct IndexView<R: Record, I: IndexSpec<R>, C: RecordCodec = BincodeCodec> {
    context: Arc<Context<R, C>>,
    space: ColumnSpace,
    resolution: Resolution,
    _index: PhantomData<fn() -> I>,
}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> IndexView<R, I, C> {
    pub(crate) fn new(context: Arc<Context<R, C>>, space: ColumnSpace) -> Self {
        let resolution = context.layout.resolution(space);
        Self {
            context,
            space,
            resolution,
            _index: PhantomData,
        }
    }

    /// Index name
    pub fn name(&self) -> &'static str {
        I::NAME
    }

    /// Column space backing this index
    pub fn space(&self) -> ColumnSpace {
        self.space
    }

    /// Whether this is the primary index
    pub fn is_primary(&self) -> bool {
        self.resolution.is_direct()
    }

    /// How this index's entries are dereferenced
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn open_in(&self, view: ReadView) -> Result<Cursor<R, I, C>> {
        Cursor::open(Arc::clone(&self.context), self.space, self.resolution, view)
    }

    fn open(&self) -> Result<Cursor<R, I, C>> {
        self.open_in(self.context.read_view())
    }

    fn encode<K: Serialize + ?Sized>(&self, key: &K) -> Result<Vec<u8>> {
        self.context.codec.encode_key(key)
    }

    /// Cursor at the smallest key; `end` if the index is empty
    pub fn begin(&self) -> Result<Cursor<R, I, C>> {
        Ok(self.open()?.seek_to_first())
    }

    /// The `end` sentinel
    pub fn end(&self) -> Result<Cursor<R, I, C>> {
        self.open()
    }

    /// Cursor at the greatest key (the position before `end`)
    pub fn last(&self) -> Result<Cursor<R, I, C>> {
        Ok(self.open()?.seek_to_last())
    }

    /// Cursor at exactly `key`, or `end`
    ///
    /// This is not a lower bound: a cursor is only returned for a
    /// byte-identical key.
    pub fn find(&self, key: &I::Key) -> Result<Cursor<R, I, C>> {
        let bytes = self.encode(key)?;
        let cursor = self.open()?.seek_exact(&bytes);
        trace!(target: "mira::index", index = I::NAME, found = cursor.valid(), "find");
        Ok(cursor)
    }

    /// Cursor at the smallest key >= `key`, or `end`
    ///
    /// `key` may be any serializable bound, e.g. a prefix of a composite key.
    pub fn lower_bound<K: Serialize + ?Sized>(&self, key: &K) -> Result<Cursor<R, I, C>> {
        let bytes = self.encode(key)?;
        Ok(self.open()?.seek_lower(&bytes))
    }

    /// Cursor at the smallest key > `key`, or `end`
    pub fn upper_bound<K: Serialize + ?Sized>(&self, key: &K) -> Result<Cursor<R, I, C>> {
        let bytes = self.encode(key)?;
        Ok(self.open()?.seek_upper(&bytes))
    }

    /// `(lower_bound(lower), upper_bound(upper))`, both read from one view
    ///
    /// No check is made that `lower <= upper`. When it is not, the first
    /// cursor lies past the second and iterating from one to the other
    /// runs to the end of the index.
    pub fn range<L, U>(&self, lower: &L, upper: &U) -> Result<(Cursor<R, I, C>, Cursor<R, I, C>)>
    where
        L: Serialize + ?Sized,
        U: Serialize + ?Sized,
    {
        let lower = self.encode(lower)?;
        let upper = self.encode(upper)?;
        let view = self.context.read_view();
        let first = self.open_in(view.clone())?.seek_lower(&lower);
        let last = self.open_in(view)?.seek_upper(&upper);
        Ok((first, last))
    }

    /// Iterate every record in index order
    pub fn iter(&self) -> Result<Iter<R, I, C>> {
        let view = self.context.read_view();
        let first = self.open_in(view.clone())?.seek_to_first();
        let end = self.open_in(view)?;
        Ok(Iter::new(first, end))
    }

    /// Iterate the records of `range(lower, upper)`
    pub fn range_iter<L, U>(&self, lower: &L, upper: &U) -> Result<Iter<R, I, C>>
    where
        L: Serialize + ?Sized,
        U: Serialize + ?Sized,
    {
        let (first, end) = self.range(lower, upper)?;
        Ok(Iter::new(first, end))
    }
}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> Clone for IndexView<R, I, C> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
            space: self.space,
            resolution: self.resolution,
            _index: PhantomData,
        }
    }
}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> fmt::Debug for IndexView<R, I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexView")
            .field("index", &I::NAME)
            .field("space", &self.space)
            .field("resolution", &self.resolution)
            .finish()
    }
}
