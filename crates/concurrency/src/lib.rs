//! Concurrency layer for Mira
//!
//! This crate implements the identity cache shared by every cursor:
//! - IdentityCache: identity → canonical shared record, insert-if-absent
//! - Weak entries: unreferenced records are reclaimed
//! - Bounded retention of recently materialized records
//! - CacheStats: hit/miss/insert/race counters
//!
//! Resolving the same identity through any index, on any thread, yields the
//! same `Arc`. The cache, not the cursor, owns that atomicity.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;

pub use cache::{CacheConfig, CacheStats, IdentityCache, MIN_SWEEP};
