//! Iter: Rust iterator over a half-open cursor range

use std::fmt;
use std::sync::Arc;

use mira_core::{BincodeCodec, IndexSpec, Record, RecordCodec};

use crate::cursor::Cursor;

/// Iterator yielding the records between two cursors of one index
///
/// Starts at `first` and stops when the cursor equals `end` or runs off the
/// index. Dereferences with [`Cursor::get`], so invariant violations panic.
pub struct Iter<R: Record, I: IndexSpec<R>, C: RecordCodec = BincodeCodec> {
    current: Cursor<R, I, C>,
    end: Cursor<R, I, C>,
}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> Iter<R, I, C> {
    /// Iterate `[first, end)`
    pub fn new(first: Cursor<R, I, C>, end: Cursor<R, I, C>) -> Self {
        Self {
            current: first,
            end,
        }
    }

    /// Current position
    pub fn cursor(&self) -> &Cursor<R, I, C> {
        &self.current
    }
}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> Iterator for Iter<R, I, C> {
    type Item = Arc<R>;

    fn next(&mut self) -> Option<Arc<R>> {
        if !self.current.valid() || self.current == self.end {
            return None;
        }
        let record = self.current.get();
        self.current.advance();
        Some(record)
    }
}

impl<R: Record, I: IndexSpec<R>, C: RecordCodec> fmt::Debug for Iter<R, I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("current", &self.current)
            .field("end", &self.end)
            .finish()
    }
}
