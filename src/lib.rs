//! Mira - ordered multi-index iteration over a column-space store
//!
//! Records are stored once, keyed by identity, in a primary column space.
//! Every secondary index is a further column space whose values are primary
//! keys. Mira gives ordered, bidirectional cursors over any of these indices
//! and hands out one shared instance per record identity.
//!
//! # Quick Start
//!
//! ```ignore
//! use mira::{ColumnStore, IndexConfig, MultiIndex};
//!
//! let store = Arc::new(ColumnStore::new(2));
//! let people = MultiIndex::<Person>::open(store, IndexConfig::new(["by_id", "by_name"]))?;
//!
//! let by_name = people.index::<ByName>()?;
//! for person in by_name.range_iter("B", "D")? {
//!     println!("{} ({})", person.name, person.id);
//! }
//! ```
//!
//! # Architecture
//!
//! - `mira-core`: record and index traits, codec, error type
//! - `mira-storage`: in-memory column store, snapshots, raw cursors
//! - `mira-concurrency`: the identity cache
//! - `mira-index`: cursors, record resolution, configuration

pub use mira_concurrency::{CacheConfig, CacheStats, IdentityCache, MIN_SWEEP};
pub use mira_core::{
    BincodeCodec, ColumnRead, ColumnSpace, Error, IndexSpec, RawCursor, ReadMode, Record,
    RecordCodec, Result,
};
pub use mira_index::*;
pub use mira_storage::{ColumnStore, ReadView, StoreCursor, StoreSnapshot, WriteOp};
