//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use serde::{Deserialize, Serialize};

pub use mira::{
    CacheConfig, ColumnSpace, ColumnStore, Error, Fixture, IndexConfig, IndexSpec, MultiIndex,
    ReadMode, Record, RecordCodec,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `mira::*` tracing output through the test harness writer.
///
/// Set `RUST_LOG=mira=trace` to see it.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Records and indices
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub age: u32,
}

impl Record for Person {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

pub struct ById;

impl IndexSpec<Person> for ById {
    type Key = u64;
    const NAME: &'static str = "by_id";

    fn key(record: &Person) -> u64 {
        record.id
    }
}

pub struct ByName;

impl IndexSpec<Person> for ByName {
    type Key = String;
    const NAME: &'static str = "by_name";

    fn key(record: &Person) -> String {
        record.name.clone()
    }
}

/// Age, then id
pub struct ByAge;

impl IndexSpec<Person> for ByAge {
    type Key = (u32, u64);
    const NAME: &'static str = "by_age";

    fn key(record: &Person) -> (u32, u64) {
        (record.age, record.id)
    }
}

pub const PRIMARY: ColumnSpace = ColumnSpace::new(0);
pub const NAMES: ColumnSpace = ColumnSpace::new(1);
pub const AGES: ColumnSpace = ColumnSpace::new(2);

pub fn person(id: u64, name: &str, age: u32) -> Person {
    Person {
        id,
        name: name.to_string(),
        age,
    }
}

// ============================================================================
// TestIndex - container plus its store
// ============================================================================

/// Container over a fresh three-column-space store.
pub struct TestIndex {
    pub people: MultiIndex<Person>,
}

impl TestIndex {
    /// Snapshot-mode container with default cache settings.
    pub fn new() -> Self {
        Self::with_config(Self::config())
    }

    /// Live-mode container.
    pub fn live() -> Self {
        Self::with_config(Self::config().with_read_mode(ReadMode::Live))
    }

    pub fn config() -> IndexConfig {
        IndexConfig::new(["by_id", "by_name", "by_age"])
    }

    pub fn with_config(config: IndexConfig) -> Self {
        init_tracing();
        let store = Arc::new(ColumnStore::new(3));
        let people = MultiIndex::open(store, config).expect("open multi-index");
        Self { people }
    }

    /// Insert records into every index in one batch.
    pub fn insert(&self, records: &[Person]) -> u64 {
        let mut fixture = Fixture::new::<ById>(&self.people)
            .and_then(|f| f.with_secondary::<ByName>())
            .and_then(|f| f.with_secondary::<ByAge>())
            .expect("fixture");
        for record in records {
            fixture.insert(record).expect("stage record");
        }
        fixture.commit().expect("commit")
    }

    /// Remove a record from every index in one batch.
    pub fn remove(&self, record: &Person) -> u64 {
        let codec = self.people.codec();
        let ops = vec![
            mira::WriteOp::Delete {
                space: PRIMARY,
                key: codec.encode_key(&record.id).unwrap(),
            },
            mira::WriteOp::Delete {
                space: NAMES,
                key: codec.encode_key(&record.name).unwrap(),
            },
            mira::WriteOp::Delete {
                space: AGES,
                key: codec.encode_key(&(record.age, record.id)).unwrap(),
            },
        ];
        self.people.store().apply_batch(&ops).unwrap()
    }

    /// Delete only the primary entry, leaving secondaries dangling.
    pub fn remove_primary_only(&self, id: u64) {
        let key = self.people.codec().encode_key(&id).unwrap();
        self.people.store().delete(PRIMARY, &key).unwrap();
    }

    pub fn store(&self) -> &Arc<ColumnStore> {
        self.people.store()
    }
}

/// Standard five-person population.
pub fn population() -> Vec<Person> {
    vec![
        person(1, "alice", 34),
        person(2, "bob", 27),
        person(3, "carol", 34),
        person(4, "dave", 51),
        person(5, "erin", 19),
    ]
}
