//! Shared record type and indices for unit tests

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use mira_core::{IndexSpec, Record};
use mira_storage::ColumnStore;

use crate::{Fixture, IndexConfig, MultiIndex};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Person {
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

pub(crate) struct ById;

impl IndexSpec<Person> for ById {
    type Key = u64;
    const NAME: &'static str = "by_id";

    fn key(record: &Person) -> u64 {
        record.id
    }
}

pub(crate) struct ByName;

impl IndexSpec<Person> for ByName {
    type Key = String;
    const NAME: &'static str = "by_name";

    fn key(record: &Person) -> String {
        record.name.clone()
    }
}

/// Age, then id to keep entries unique
pub(crate) struct ByAge;

impl IndexSpec<Person> for ByAge {
    type Key = (u32, u64);
    const NAME: &'static str = "by_age";

    fn key(record: &Person) -> (u32, u64) {
        (record.age, record.id)
    }
}

pub(crate) fn person(id: u64, name: &str, age: u32) -> Person {
    Person {
        id,
        name: name.to_string(),
        age,
    }
}

pub(crate) fn config() -> IndexConfig {
    IndexConfig::new(["by_id", "by_name", "by_age"])
}

/// Container over a fresh three-space store holding `rows`
pub(crate) fn people(rows: &[(u64, &str, u32)]) -> (MultiIndex<Person>, Vec<Person>) {
    people_with(config(), rows)
}

pub(crate) fn people_with(
    config: IndexConfig,
    rows: &[(u64, &str, u32)],
) -> (MultiIndex<Person>, Vec<Person>) {
    let store = Arc::new(ColumnStore::new(3));
    let index = MultiIndex::open(store, config).unwrap();
    let records: Vec<Person> = rows
        .iter()
        .map(|&(id, name, age)| person(id, name, age))
        .collect();

    let mut fixture = Fixture::new::<ById>(&index)
        .unwrap()
        .with_secondary::<ByName>()
        .unwrap()
        .with_secondary::<ByAge>()
        .unwrap();
    for record in &records {
        fixture.insert(record).unwrap();
    }
    fixture.commit().unwrap();
    (index, records)
}
