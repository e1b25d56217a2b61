//! Record and index definitions
//!
//! A [`Record`] is the typed value stored in the primary column space. Its
//! identity must be the leading field of its serialized form so that the
//! identity can be parsed without decoding the whole record.
//!
//! An [`IndexSpec`] names one index over a record type and extracts the sort
//! key that index orders by. Implementors are zero-sized marker types, which
//! lets cursors be typed by the index they traverse.

use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record stored in the primary index.
///
/// # Identity Layout
///
/// The codec parses `Self::Id` from the *leading* bytes of a serialized
/// record. With serde-derived structs this means the identity field must be
/// declared first.
///
/// ```
/// use mira_core::Record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Account {
///     id: u64, // must come first
///     name: String,
/// }
///
/// impl Record for Account {
///     type Id = u64;
///     fn id(&self) -> u64 {
///         self.id
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Compact, orderable identity token
    type Id: Serialize + DeserializeOwned + Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static;

    /// The record's identity
    fn id(&self) -> Self::Id;
}

/// One index over records of type `R`.
///
/// `NAME` is matched against the column-space layout supplied at
/// construction time to find the column space backing this index.
pub trait IndexSpec<R: Record>: Send + Sync + 'static {
    /// Sort key this index orders by
    type Key: Serialize;

    /// Index name as it appears in the column-space layout
    const NAME: &'static str;

    /// Extract this index's sort key from a record
    fn key(record: &R) -> Self::Key;
}
