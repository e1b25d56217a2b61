//! Core traits for store read abstraction
//!
//! This module defines the RawCursor and ColumnRead traits: the narrow
//! interface the index layer consumes from an ordered store.

use crate::error::Result;
use crate::types::ColumnSpace;

/// Positioned, steppable reference into one column space.
///
/// Keys are ordered bytewise. A raw cursor is either valid (denotes an entry)
/// or invalid (before the first entry, after the last, or never positioned).
///
/// `key()` and `value()` return `None` when the cursor is invalid.
///
/// Stepping an invalid cursor leaves it invalid.
pub trait RawCursor: Send {
    /// Whether the cursor denotes an entry
    fn valid(&self) -> bool;

    /// Position at the smallest key; invalid if the column space is empty
    fn seek_to_first(&mut self);

    /// Position at the greatest key; invalid if the column space is empty
    fn seek_to_last(&mut self);

    /// Position at the first key >= `target`
    fn seek(&mut self, target: &[u8]);

    /// Position at the last key <= `target`
    fn seek_for_prev(&mut self, target: &[u8]);

    /// Step to the next key in sort order
    fn next(&mut self);

    /// Step to the previous key in sort order
    fn prev(&mut self);

    /// Current key bytes
    fn key(&self) -> Option<&[u8]>;

    /// Current value bytes
    fn value(&self) -> Option<&[u8]>;

    /// Drop the position, making the cursor invalid
    fn invalidate(&mut self);
}

/// Read access to a set of column spaces.
///
/// Thread safety: implementations are shared across cursors on many threads
/// (requires Send + Sync).
pub trait ColumnRead: Send + Sync {
    /// Raw cursor type produced by this reader
    type Cursor: RawCursor;

    /// Number of column spaces
    fn column_spaces(&self) -> usize;

    /// Open an unpositioned (invalid) raw cursor over `space`
    ///
    /// # Errors
    ///
    /// Returns `ColumnSpaceOutOfRange` if `space` is not part of the layout.
    fn cursor(&self, space: ColumnSpace) -> Result<Self::Cursor>;

    /// Point lookup of `key` in `space`
    ///
    /// # Errors
    ///
    /// Returns `ColumnSpaceOutOfRange` if `space` is not part of the layout.
    fn get(&self, space: ColumnSpace, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Version of the state this reader observes
    ///
    /// For live readers this is the latest committed version at call time.
    fn version(&self) -> u64;
}
