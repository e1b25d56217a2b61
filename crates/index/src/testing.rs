//! Test utilities for populating a store in index layout
//!
//! Writing index entries is outside this crate's read path, but tests,
//! benches and examples need a store whose column spaces are consistent:
//! one primary entry per record and one secondary entry pointing at it
//! per secondary index. `Fixture` stages those writes and commits them as
//! one atomic batch.
//!
//! ```ignore
//! let mut fixture = Fixture::new::<ById>(&people)?.with_secondary::<ByName>()?;
//! fixture.insert(&alice)?.insert(&bob)?;
//! fixture.commit()?;
//! ```

use mira_core::{ColumnSpace, Error, IndexSpec, Record, RecordCodec, Result};
use mira_storage::WriteOp;

use crate::container::MultiIndex;

type KeyEncoder<R, C> = fn(&C, &R) -> Result<Vec<u8>>;

fn encode_index_key<R: Record, C: RecordCodec, I: IndexSpec<R>>(
    codec: &C,
    record: &R,
) -> Result<Vec<u8>> {
    codec.encode_key(&I::key(record))
}

/// Staged batch of index writes for one `MultiIndex`
pub struct Fixture<'a, R: Record, C: RecordCodec> {
    index: &'a MultiIndex<R, C>,
    primary: KeyEncoder<R, C>,
    secondaries: Vec<(ColumnSpace, KeyEncoder<R, C>)>,
    ops: Vec<WriteOp>,
}

impl<'a, R: Record, C: RecordCodec> Fixture<'a, R, C> {
    /// Stage writes whose primary key is given by `P`
    ///
    /// # Errors
    ///
    /// Returns `UnknownIndex` if `P` is not in the layout and
    /// `InvalidConfig` if it is not the primary index.
    pub fn new<P: IndexSpec<R>>(index: &'a MultiIndex<R, C>) -> Result<Self> {
        let space = index.layout().space_of(P::NAME)?;
        if space != index.layout().primary() {
            return Err(Error::InvalidConfig(format!(
                "'{}' is not the primary index",
                P::NAME
            )));
        }
        Ok(Self {
            index,
            primary: encode_index_key::<R, C, P>,
            secondaries: Vec::new(),
            ops: Vec::new(),
        })
    }

    /// Also write entries for secondary index `S`
    pub fn with_secondary<S: IndexSpec<R>>(mut self) -> Result<Self> {
        let space = self.index.layout().space_of(S::NAME)?;
        if space == self.index.layout().primary() {
            return Err(Error::InvalidConfig(format!(
                "'{}' is the primary index",
                S::NAME
            )));
        }
        self.secondaries.push((space, encode_index_key::<R, C, S>));
        Ok(self)
    }

    /// Stage one record and its secondary entries
    pub fn insert(&mut self, record: &R) -> Result<&mut Self> {
        let index = self.index;
        let codec = index.codec();
        let primary_key = (self.primary)(codec, record)?;

        for (space, encode) in &self.secondaries {
            self.ops.push(WriteOp::Put {
                space: *space,
                key: encode(codec, record)?,
                value: primary_key.clone(),
            });
        }
        self.ops.push(WriteOp::Put {
            space: index.layout().primary(),
            key: primary_key,
            value: codec.encode_record(record)?,
        });
        Ok(self)
    }

    /// Number of staged writes
    pub fn pending(&self) -> usize {
        self.ops.len()
    }

    /// Apply every staged write as one batch, returning the new store version
    pub fn commit(self) -> Result<u64> {
        self.index.store().apply_batch(&self.ops)
    }
}
