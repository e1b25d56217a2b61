//! Storage layer for Mira
//!
//! This crate implements the store collaborator the index layer reads from:
//! - ColumnStore: N ordered byte-keyed column spaces (BTreeMap + RwLock)
//! - StoreSnapshot: O(column spaces) point-in-time view via copy-on-write
//! - ReadView: Snapshot-pinned or live reads, chosen per cursor
//! - StoreCursor: Raw seek/step cursor over one column space
//!
//! # Copy-on-write
//!
//! Each column space is an `Arc<BTreeMap>`. Snapshots clone the `Arc`s;
//! writers clone a column space only while a snapshot still references it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod snapshot;
pub mod store;
pub mod view;

pub use cursor::{StoreCursor, READ_AHEAD};
pub use snapshot::StoreSnapshot;
pub use store::{ColumnStore, WriteOp};
pub use view::ReadView;
