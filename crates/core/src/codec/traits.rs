//! Record codec trait definitions.

use serde::Serialize;

use crate::error::Result;
use crate::record::Record;

/// Record codec trait.
///
/// All keys and records passing between the index layer and the store go
/// through the codec.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync`: cursors on different threads decode
/// through the same codec instance.
///
/// # Identity Prefix
///
/// `decode_id` must succeed on any byte string produced by `encode_record`
/// and must agree with `Record::id` of the decoded record.
pub trait RecordCodec: Send + Sync + Clone + 'static {
    /// Encode a sort key (or a bound over sort keys).
    fn encode_key<K: Serialize + ?Sized>(&self, key: &K) -> Result<Vec<u8>>;

    /// Encode a full record for the primary column space.
    fn encode_record<R: Record>(&self, record: &R) -> Result<Vec<u8>>;

    /// Fully decode a record.
    fn decode_record<R: Record>(&self, bytes: &[u8]) -> Result<R>;

    /// Parse only the identity from the leading bytes of a serialized record.
    fn decode_id<R: Record>(&self, bytes: &[u8]) -> Result<R::Id>;

    /// Unique codec identifier.
    fn codec_id(&self) -> &str;
}
