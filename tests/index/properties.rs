//! Property tests: cursor positioning agrees with a BTreeMap model.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::common::*;

fn populated(ids: &[u64]) -> TestIndex {
    let t = TestIndex::new();
    let records: Vec<Person> = ids
        .iter()
        .map(|&id| person(id, &format!("p{:05}", id), (id % 90) as u32))
        .collect();
    t.insert(&records);
    t
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bounds_match_model(
        ids in proptest::collection::btree_set(0u64..500, 0..40),
        target in 0u64..520,
    ) {
        let ids: Vec<u64> = ids.into_iter().collect();
        let t = populated(&ids);
        let by_id = t.people.index::<ById>().unwrap();
        let model: BTreeMap<u64, ()> = ids.iter().map(|&id| (id, ())).collect();

        let lower = by_id.lower_bound(&target).unwrap();
        let expected = model.range(target..).next().map(|(k, _)| *k);
        prop_assert_eq!(lower.valid().then(|| lower.get().id), expected);

        let upper = by_id.upper_bound(&target).unwrap();
        let expected = model.range(target + 1..).next().map(|(k, _)| *k);
        prop_assert_eq!(upper.valid().then(|| upper.get().id), expected);

        let codec = t.people.codec();
        let found = by_id.find(&target).unwrap();
        prop_assert_eq!(found.valid(), model.contains_key(&target));
        if found.valid() {
            let record = found.get();
            prop_assert_eq!(
                codec.encode_key(&ById::key(&record)).unwrap(),
                codec.encode_key(&target).unwrap()
            );
        }
    }

    #[test]
    fn secondary_find_is_exact(
        ids in proptest::collection::btree_set(0u64..500, 0..40),
        target in 0u64..520,
    ) {
        let ids: Vec<u64> = ids.into_iter().collect();
        let t = populated(&ids);
        let by_name = t.people.index::<ByName>().unwrap();
        let codec = t.people.codec();
        let name = format!("p{:05}", target);

        let found = by_name.find(&name).unwrap();
        prop_assert_eq!(found.valid(), ids.contains(&target));
        if found.valid() {
            let record = found.get();
            prop_assert_eq!(record.id, target);
            prop_assert_eq!(
                codec.encode_key(&ByName::key(&record)).unwrap(),
                codec.encode_key(&name).unwrap()
            );
            let expected = codec.encode_key(&name).unwrap();
            prop_assert_eq!(found.key_bytes(), Some(expected.as_slice()));
        }
    }

    #[test]
    fn range_iter_matches_model(
        ids in proptest::collection::btree_set(0u64..500, 0..40),
        a in 0u64..500,
        b in 0u64..500,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let ids: Vec<u64> = ids.into_iter().collect();
        let t = populated(&ids);

        let got: Vec<u64> = t
            .people
            .index::<ById>()
            .unwrap()
            .range_iter(&lo, &hi)
            .unwrap()
            .map(|p| p.id)
            .collect();
        let expected: Vec<u64> = ids.iter().copied().filter(|id| (lo..=hi).contains(id)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn secondary_scan_visits_every_record_once(
        ids in proptest::collection::btree_set(0u64..500, 0..40),
    ) {
        let ids: Vec<u64> = ids.into_iter().collect();
        let t = populated(&ids);

        let mut seen: Vec<u64> = t
            .people
            .index::<ByAge>()
            .unwrap()
            .iter()
            .unwrap()
            .map(|p| p.id)
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, ids);
    }
}
