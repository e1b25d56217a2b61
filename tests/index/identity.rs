//! One shared instance per record identity.

use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::*;

#[test]
fn primary_and_secondary_share_instance() {
    let t = TestIndex::new();
    t.insert(&population());

    let by_id = t.people.index::<ById>().unwrap().find(&4).unwrap().get();
    let by_name = t
        .people
        .index::<ByName>()
        .unwrap()
        .find(&"dave".to_string())
        .unwrap()
        .get();
    let by_age = t
        .people
        .index::<ByAge>()
        .unwrap()
        .find(&(51, 4))
        .unwrap()
        .get();

    assert!(Arc::ptr_eq(&by_id, &by_name));
    assert!(Arc::ptr_eq(&by_id, &by_age));
    assert_eq!(*by_id, person(4, "dave", 51));
}

#[test]
fn repeated_dereference_is_stable() {
    let t = TestIndex::new();
    t.insert(&population());
    let cursor = t.people.index::<ByName>().unwrap().begin().unwrap();

    let first = cursor.get();
    let second = cursor.get();
    assert!(Arc::ptr_eq(&first, &second));
    // Dereference does not move the cursor
    assert_eq!(cursor.get().name, "bob");
}

#[test]
fn full_scans_over_two_indices_share_every_instance() {
    let t = TestIndex::new();
    t.insert(&population());

    let mut by_id: Vec<Arc<Person>> = t.people.index::<ById>().unwrap().iter().unwrap().collect();
    let mut by_age: Vec<Arc<Person>> = t.people.index::<ByAge>().unwrap().iter().unwrap().collect();
    by_id.sort_by_key(|p| p.id);
    by_age.sort_by_key(|p| p.id);

    assert_eq!(by_id.len(), 5);
    for (a, b) in by_id.iter().zip(&by_age) {
        assert!(Arc::ptr_eq(a, b));
    }
    assert_eq!(t.people.cache().stats().inserts, 5);
}

#[test]
fn dropped_records_are_re_materialized() {
    let t = TestIndex::with_config(
        TestIndex::config().with_cache(CacheConfig { retain_recent: 0 }),
    );
    t.insert(&population());
    let by_id = t.people.index::<ById>().unwrap();

    let first = by_id.find(&1).unwrap().get();
    let weak = Arc::downgrade(&first);
    drop(first);
    assert!(weak.upgrade().is_none());

    let again = by_id.find(&1).unwrap().get();
    assert_eq!(again.name, "alice");
    assert_eq!(t.people.cache().stats().inserts, 2);
    assert_eq!(t.people.cache().purge(), 0);
}

#[test]
fn concurrent_dereference_yields_one_instance() {
    const THREADS: usize = 8;

    let t = TestIndex::with_config(
        TestIndex::config().with_cache(CacheConfig { retain_recent: 0 }),
    );
    t.insert(&population());
    let people = t.people.clone();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let people = people.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Alternate between the primary and a secondary path
                if i % 2 == 0 {
                    people.index::<ById>().unwrap().find(&3).unwrap().get()
                } else {
                    people.index::<ByName>().unwrap().find(&"carol".to_string()).unwrap().get()
                }
            })
        })
        .collect();

    let results: Vec<Arc<Person>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for r in &results[1..] {
        assert!(Arc::ptr_eq(&results[0], r));
    }
}

#[test]
fn shared_cache_spans_containers() {
    let t = TestIndex::new();
    t.insert(&population());
    let other = MultiIndex::from_parts(
        Arc::clone(t.store()),
        TestIndex::config(),
        mira::BincodeCodec,
        Arc::clone(t.people.cache()),
    )
    .unwrap();

    let a = t.people.index::<ById>().unwrap().find(&2).unwrap().get();
    let b = other.index::<ByName>().unwrap().find(&"bob".to_string()).unwrap().get();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn full_scan_leaves_cache_bounded() {
    let t = TestIndex::with_config(
        TestIndex::config().with_cache(CacheConfig { retain_recent: 0 }),
    );
    let records: Vec<Person> = (0..5_000)
        .map(|id| person(id, &format!("p{:05}", id), (id % 90) as u32))
        .collect();
    t.insert(&records);

    let scanned = t.people.index::<ById>().unwrap().iter().unwrap().count();
    assert_eq!(scanned, 5_000);
    assert!(t.people.cache().len() <= mira::MIN_SWEEP);

    t.people.cache().purge();
    assert!(t.people.cache().is_empty());
}
