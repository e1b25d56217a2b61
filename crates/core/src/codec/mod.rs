//! Byte codec for keys and records.
//!
//! The store only ever holds bytes. The codec seam turns typed keys and
//! records into those bytes and back, and parses a record's identity from
//! the leading bytes of its serialized form without decoding the rest.
//!
//! Column spaces order their keys bytewise, so a codec's key encoding
//! determines each index's sort order.
//!
//! # Usage
//!
//! ```ignore
//! use mira_core::codec::{BincodeCodec, RecordCodec};
//!
//! let codec = BincodeCodec;
//! let bytes = codec.encode_record(&account)?;
//! let id = codec.decode_id::<Account>(&bytes)?;
//! assert_eq!(id, account.id);
//! ```

mod binary;
mod traits;

pub use binary::BincodeCodec;
pub use traits::RecordCodec;
