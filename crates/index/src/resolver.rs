//! Record resolution: turning a cursor's raw entry into a shared record
//!
//! Two paths, chosen once per index when its view is created:
//!
//! - [`Resolution::Direct`] (primary index): the entry value is the full
//!   serialized record.
//! - [`Resolution::Indirect`] (secondary index): the entry value is the
//!   primary key. One point lookup in the primary column space fetches the
//!   serialized record, which must exist.
//!
//! Both paths then parse only the identity, consult the identity cache, and
//! decode the full record on a miss. Whatever handle the cache returns is the
//! result, even if it is not the record just decoded.
//!
//! The cache is consulted with the record bytes read through the cursor's
//! own view, so a hit is always an instance decoded from exactly those
//! bytes. A snapshot cursor never observes a record version other than the
//! one in its snapshot, even when other cursors have materialized newer or
//! older versions of the same identity.

use std::sync::Arc;

use tracing::trace;

use mira_core::{ColumnRead, ColumnSpace, Error, Record, RecordCodec, Result};
use mira_concurrency::IdentityCache;

/// How entries of one column space are dereferenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Value bytes are the serialized record
    Direct,
    /// Value bytes are a key into the primary column space
    Indirect {
        /// Column space holding full records
        primary: ColumnSpace,
    },
}

impl Resolution {
    /// Whether entries resolve without a primary lookup
    pub fn is_direct(&self) -> bool {
        matches!(self, Resolution::Direct)
    }

    /// Resolve the entry value `value` read from `space` through `view`.
    ///
    /// # Errors
    ///
    /// - `DanglingSecondary` if an indirect entry's primary key is absent
    /// - `Corruption` if the stored record bytes cannot be decoded, or decode
    ///   to a record whose identity disagrees with its prefix
    ///
    /// All of these are fatal.
    pub fn resolve<R, C, V>(
        &self,
        space: ColumnSpace,
        value: &[u8],
        view: &V,
        cache: &IdentityCache<R>,
        codec: &C,
    ) -> Result<Arc<R>>
    where
        R: Record,
        C: RecordCodec,
        V: ColumnRead + ?Sized,
    {
        match *self {
            Resolution::Direct => materialize(value, cache, codec),
            Resolution::Indirect { primary } => {
                let record_bytes = view
                    .get(primary, value)?
                    .ok_or_else(|| Error::DanglingSecondary {
                        space,
                        key: value.to_vec(),
                    })?;
                trace!(target: "mira::index", %space, %primary, "Indirect lookup");
                materialize(&record_bytes, cache, codec)
            }
        }
    }
}

fn materialize<R: Record, C: RecordCodec>(
    bytes: &[u8],
    cache: &IdentityCache<R>,
    codec: &C,
) -> Result<Arc<R>> {
    let id = codec
        .decode_id::<R>(bytes)
        .map_err(|e| Error::Corruption(format!("unreadable record identity: {}", e)))?;

    if let Some(hit) = cache.get(&id, bytes) {
        return Ok(hit);
    }

    let record = codec
        .decode_record::<R>(bytes)
        .map_err(|e| Error::Corruption(format!("unreadable record {:?}: {}", id, e)))?;
    if record.id() != id {
        return Err(Error::Corruption(format!(
            "record identity {:?} does not match its prefix {:?}",
            record.id(),
            id
        )));
    }

    Ok(cache.cache(record, bytes))
}
