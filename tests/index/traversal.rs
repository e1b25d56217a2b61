//! Stepping, copying and comparing cursors.

use crate::common::*;

#[test]
fn forward_and_backward_agree() {
    let t = TestIndex::new();
    t.insert(&population());
    let by_age = t.people.index::<ByAge>().unwrap();

    let mut forward = Vec::new();
    let mut cursor = by_age.begin().unwrap();
    while cursor.valid() {
        forward.push(cursor.get().id);
        cursor.advance();
    }

    let mut backward = Vec::new();
    let mut cursor = by_age.last().unwrap();
    while cursor.valid() {
        backward.push(cursor.get().id);
        cursor.retreat();
    }
    backward.reverse();

    assert_eq!(forward, vec![5, 2, 1, 3, 4]);
    assert_eq!(forward, backward);
}

#[test]
fn advance_then_retreat_returns_to_same_key() {
    let t = TestIndex::new();
    t.insert(&population());
    let by_id = t.people.index::<ById>().unwrap();

    let mut cursor = by_id.find(&3).unwrap();
    let mark = cursor.clone();
    cursor.advance();
    cursor.retreat();
    assert_eq!(cursor, mark);
}

#[test]
fn copy_advances_independently() {
    let t = TestIndex::new();
    t.insert(&population());
    let by_name = t.people.index::<ByName>().unwrap();

    let source = by_name.begin().unwrap();
    let mut copy = source.clone();
    copy.advance();
    copy.advance();

    assert_eq!(source.get().name, "bob");
    assert_eq!(copy.get().name, "erin");
}

#[test]
fn cursors_from_separate_calls_compare_by_key() {
    let t = TestIndex::new();
    t.insert(&population());
    let by_id = t.people.index::<ById>().unwrap();

    assert_eq!(by_id.find(&2).unwrap(), by_id.lower_bound(&2u64).unwrap());
    assert_ne!(by_id.find(&2).unwrap(), by_id.find(&3).unwrap());
    assert_ne!(by_id.find(&2).unwrap(), by_id.end().unwrap());
}

#[test]
fn stepping_off_either_end_reaches_end() {
    let t = TestIndex::new();
    t.insert(&population());
    let by_id = t.people.index::<ById>().unwrap();
    let end = by_id.end().unwrap();

    let mut cursor = by_id.last().unwrap();
    cursor.advance();
    assert_eq!(cursor, end);

    let mut cursor = by_id.begin().unwrap();
    cursor.retreat();
    assert_eq!(cursor, end);
}

#[test]
#[should_panic(expected = "advance on invalid cursor")]
fn advance_past_end_panics() {
    let t = TestIndex::new();
    t.insert(&population());
    let mut cursor = t.people.index::<ById>().unwrap().last().unwrap();
    cursor.advance();
    cursor.advance();
}

#[test]
fn dangling_secondary_is_reported() {
    let t = TestIndex::new();
    t.insert(&population());
    t.remove_primary_only(3);

    let by_name = t.people.index::<ByName>().unwrap();
    let cursor = by_name.find(&"carol".to_string()).unwrap();
    match cursor.try_get() {
        Err(Error::DanglingSecondary { space, .. }) => assert_eq!(space, NAMES),
        other => panic!("expected dangling secondary, got {:?}", other),
    }
    // Neighbours still resolve
    assert_eq!(by_name.find(&"alice".to_string()).unwrap().get().id, 1);
}

#[test]
#[should_panic(expected = "fatal dereference")]
fn dangling_secondary_get_panics() {
    let t = TestIndex::new();
    t.insert(&population());
    t.remove_primary_only(5);
    let _ = t
        .people
        .index::<ByAge>()
        .unwrap()
        .iter()
        .unwrap()
        .count();
}
