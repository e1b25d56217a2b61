//! Bincode codec (default).
//!
//! Uses big-endian fixed-width integers so that unsigned integer keys sort
//! numerically under bytewise comparison. Strings and byte vectors carry a
//! fixed-width length prefix, so they sort by length first and then by
//! content.

use bincode::Options;
use serde::Serialize;

use super::traits::RecordCodec;
use crate::error::Result;
use crate::record::Record;

/// Bincode codec - big-endian, fixed-width integers.
///
/// # Example
///
/// ```
/// use mira_core::codec::{BincodeCodec, RecordCodec};
///
/// let codec = BincodeCodec;
/// let low = codec.encode_key(&1u64).unwrap();
/// let high = codec.encode_key(&256u64).unwrap();
/// assert!(low < high);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl BincodeCodec {
    fn options() -> impl Options {
        bincode::DefaultOptions::new()
            .with_big_endian()
            .with_fixint_encoding()
    }
}

impl RecordCodec for BincodeCodec {
    fn encode_key<K: Serialize + ?Sized>(&self, key: &K) -> Result<Vec<u8>> {
        Ok(Self::options().serialize(key)?)
    }

    fn encode_record<R: Record>(&self, record: &R) -> Result<Vec<u8>> {
        Ok(Self::options().serialize(record)?)
    }

    fn decode_record<R: Record>(&self, bytes: &[u8]) -> Result<R> {
        Ok(Self::options().deserialize(bytes)?)
    }

    fn decode_id<R: Record>(&self, bytes: &[u8]) -> Result<R::Id> {
        Ok(Self::options().allow_trailing_bytes().deserialize(bytes)?)
    }

    fn codec_id(&self) -> &str {
        "bincode-be-fixint"
    }
}
