//! IdentityCache: cross-index record identity reconciliation
//!
//! Maps a record identity to weak references to its materialized records.
//! Cursors hold the strong references; once the last holder drops a record,
//! its slot is dead and the next resolution materializes a fresh one.
//!
//! # Content tags
//!
//! Every slot is tagged with the serialized bytes the record was decoded
//! from. `get` and `cache` take those bytes and only ever hand out an
//! instance decoded from identical bytes. Cursors reading different versions
//! of one record (an old snapshot and a newer one) therefore get distinct
//! instances, while every path to the same version shares one.
//!
//! # Atomicity
//!
//! `cache()` performs insert-if-absent under the DashMap shard lock for the
//! identity. Two threads materializing the same record version concurrently
//! both get back the handle of whichever insert won; the loser's copy is
//! dropped.
//!
//! # Reclamation
//!
//! Dead slots are pruned whenever their identity is touched. Identities that
//! are never touched again are swept once the map has grown past twice its
//! live size at the last sweep (and at least `MIN_SWEEP` identities), so a
//! full scan leaves a bounded map behind.
//!
//! # Retention
//!
//! With `retain_recent > 0` the cache also keeps strong references to the
//! most recently inserted records (FIFO), so a record resolved, dropped and
//! resolved again shortly after is not decoded twice.

use std::collections::VecDeque;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use mira_core::Record;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Identity count below which no sweep runs
pub const MIN_SWEEP: usize = 256;

/// Identity cache configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Number of recently materialized records kept alive (0 disables)
    #[serde(default = "default_retain_recent")]
    pub retain_recent: usize,
}

fn default_retain_recent() -> usize {
    1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            retain_recent: default_retain_recent(),
        }
    }
}

/// Point-in-time cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// `get` calls that returned a live record
    pub hits: u64,
    /// `get` calls that found nothing (or only dead or other-version slots)
    pub misses: u64,
    /// Records installed as canonical by `cache`
    pub inserts: u64,
    /// `cache` calls that lost to an existing live record
    pub races: u64,
    /// Dead slots and identities removed by pruning and sweeps
    pub reclaimed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    races: AtomicU64,
    reclaimed: AtomicU64,
}

/// One materialized version of a record
struct Slot<R> {
    content: Arc<[u8]>,
    record: Weak<R>,
}

impl<R> Slot<R> {
    fn is_live(&self) -> bool {
        self.record.strong_count() > 0
    }

    fn matching(&self, content: &[u8]) -> Option<Arc<R>> {
        if &*self.content == content {
            self.record.upgrade()
        } else {
            None
        }
    }
}

/// Drop dead slots, returning how many were removed
fn prune<R>(slots: &mut Vec<Slot<R>>) -> usize {
    let before = slots.len();
    slots.retain(Slot::is_live);
    before - slots.len()
}

/// Identity → shared record cache
pub struct IdentityCache<R: Record> {
    entries: DashMap<R::Id, Vec<Slot<R>>, FxBuildHasher>,
    retained: Mutex<VecDeque<Arc<R>>>,
    retain_recent: usize,
    sweep_at: AtomicUsize,
    counters: Counters,
}

impl<R: Record> IdentityCache<R> {
    /// Create a cache with default configuration
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a cache with the given configuration
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher::default()),
            retained: Mutex::new(VecDeque::with_capacity(config.retain_recent)),
            retain_recent: config.retain_recent,
            sweep_at: AtomicUsize::new(MIN_SWEEP),
            counters: Counters::default(),
        }
    }

    /// Look up the live record for `id` decoded from exactly `content`
    ///
    /// Non-blocking with respect to other identities. A miss that finds
    /// dead slots for `id` prunes them.
    pub fn get(&self, id: &R::Id, content: &[u8]) -> Option<Arc<R>> {
        let (found, stale) = match self.entries.get(id) {
            Some(slots) => (
                slots.iter().find_map(|slot| slot.matching(content)),
                slots.iter().any(|slot| !slot.is_live()),
            ),
            None => (None, false),
        };

        match found {
            Some(_) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                if stale {
                    self.prune_identity(id);
                }
            }
        }
        found
    }

    /// Install `record`, decoded from `content`, as the canonical instance
    /// for its identity and content
    ///
    /// Returns the canonical handle: `record` itself if no live instance of
    /// the same content existed, otherwise the existing instance (and
    /// `record` is dropped).
    pub fn cache(&self, record: R, content: &[u8]) -> Arc<R> {
        let id = record.id();
        let fresh = match self.entries.entry(id) {
            Entry::Occupied(mut entry) => {
                let slots = entry.get_mut();
                self.reclaimed(prune(slots));
                if let Some(existing) = slots.iter().find_map(|slot| slot.matching(content)) {
                    self.counters.races.fetch_add(1, Ordering::Relaxed);
                    trace!(target: "mira::cache", id = ?record.id(), "Lost insert race");
                    return existing;
                }
                let fresh = Arc::new(record);
                slots.push(Slot {
                    content: Arc::from(content),
                    record: Arc::downgrade(&fresh),
                });
                fresh
            }
            Entry::Vacant(entry) => {
                let fresh = Arc::new(record);
                entry.insert(vec![Slot {
                    content: Arc::from(content),
                    record: Arc::downgrade(&fresh),
                }]);
                fresh
            }
        };
        self.counters.inserts.fetch_add(1, Ordering::Relaxed);
        self.retain(&fresh);
        self.maybe_sweep();
        fresh
    }

    fn retain(&self, record: &Arc<R>) {
        if self.retain_recent == 0 {
            return;
        }
        let mut retained = self.retained.lock();
        retained.push_back(Arc::clone(record));
        while retained.len() > self.retain_recent {
            retained.pop_front();
        }
    }

    fn reclaimed(&self, n: usize) {
        if n > 0 {
            self.counters.reclaimed.fetch_add(n as u64, Ordering::Relaxed);
        }
    }

    fn prune_identity(&self, id: &R::Id) {
        let mut removed = 0;
        let emptied = match self.entries.get_mut(id) {
            Some(mut slots) => {
                removed = prune(&mut slots);
                slots.is_empty()
            }
            None => false,
        };
        if emptied {
            self.entries.remove_if(id, |_, slots| slots.is_empty());
        }
        self.reclaimed(removed);
    }

    fn maybe_sweep(&self) {
        let threshold = self.sweep_at.load(Ordering::Relaxed);
        if self.entries.len() <= threshold {
            return;
        }
        let removed = self.purge();
        let next = (self.entries.len() * 2).max(MIN_SWEEP);
        self.sweep_at.store(next, Ordering::Relaxed);
        debug!(target: "mira::cache", removed, next_sweep = next, "Swept identity cache");
    }

    /// Number of identities with at least one slot, live or not yet pruned
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every slot whose record has been reclaimed
    ///
    /// Returns the number of identities removed.
    pub fn purge(&self) -> usize {
        let before = self.entries.len();
        let mut slots_removed = 0;
        self.entries.retain(|_, slots| {
            slots_removed += prune(slots);
            !slots.is_empty()
        });
        self.reclaimed(slots_removed);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(target: "mira::cache", removed, "Purged dead identity entries");
        }
        removed
    }

    /// Drop every entry and every retained record
    pub fn clear(&self) {
        self.retained.lock().clear();
        self.entries.clear();
    }

    /// Snapshot of the cache counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            inserts: self.counters.inserts.load(Ordering::Relaxed),
            races: self.counters.races.load(Ordering::Relaxed),
            reclaimed: self.counters.reclaimed.load(Ordering::Relaxed),
        }
    }
}

impl<R: Record> Default for IdentityCache<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> fmt::Debug for IdentityCache<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityCache")
            .field("entries", &self.entries.len())
            .field("retain_recent", &self.retain_recent)
            .field("stats", &self.stats())
            .finish()
    }
}
