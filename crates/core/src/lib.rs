//! Core types and traits for Mira
//!
//! This crate defines the foundational pieces shared by every layer:
//! - ColumnSpace: Position of an index's ordered key space inside the store
//! - ReadMode: Snapshot-pinned vs. live reads for cursors
//! - Record / IndexSpec: What a stored record and an index over it look like
//! - RecordCodec: Byte codec seam (BincodeCodec is the default)
//! - Traits: Store read abstraction (RawCursor, ColumnRead)
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod record;
pub mod traits;
pub mod types;

pub use codec::{BincodeCodec, RecordCodec};
pub use error::{Error, Result};
pub use record::{IndexSpec, Record};
pub use traits::{ColumnRead, RawCursor};
pub use types::{ColumnSpace, ReadMode};
