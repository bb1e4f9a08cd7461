#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check
// slot placement and chain state directly.

use crate::hash_table::HashTable;
use crate::policy::{DeepEquals, DeepHash, HashWith, KeyHasher};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Rehash(usize, usize),
    Iterate,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => (idx.clone(), idx.clone()).prop_map(|(a, b)| OpI::Rehash(a, b)),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Structural checks that must hold between any two operations.
fn check_invariants<H: KeyHasher<String>, E>(
    sut: &HashTable<String, i32, H, E>,
    model: &HashMap<String, i32>,
    hasher: &H,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());
    prop_assert!(crate::CAPACITY_TABLE.contains(&sut.capacity()));
    prop_assert!(sut.load_factor() <= sut.load_factors().high);
    for (k, v) in sut.iter() {
        prop_assert_eq!(model.get(k), Some(v));
        let slot = hasher.hash(k) as usize % sut.capacity();
        prop_assert!(sut.slot_holds(slot, k));
    }
    Ok(())
}

fn run_scenario<H, F>(pool: Vec<String>, ops: Vec<OpI>, make: F, hasher: H) -> Result<(), TestCaseError>
where
    H: KeyHasher<String>,
    F: Fn() -> HashTable<String, i32, H, DeepEquals>,
{
    let mut sut = make();
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                sut.put(pool[i].clone(), v).expect("put of present key/value");
                model.insert(pool[i].clone(), v);
            }
            OpI::Remove(i) => {
                let got = sut.remove(&pool[i]).expect("remove");
                prop_assert_eq!(got, model.remove(&pool[i]));
            }
            OpI::Get(i) => {
                let got = sut.get(&pool[i]).expect("get").copied();
                prop_assert_eq!(got, model.get(&pool[i]).copied());
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s).expect("contains"), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                if let Some(v) = sut.get_mut(&pool[i]).expect("get_mut") {
                    *v = v.saturating_add(d);
                }
                if let Some(v) = model.get_mut(&pool[i]) {
                    *v = v.saturating_add(d);
                }
            }
            OpI::Rehash(a, b) => {
                let moved = sut.rehash_key(&pool[a], pool[b].clone()).expect("rehash_key");
                let expected = match model.remove(&pool[a]) {
                    Some(v) => {
                        model.insert(pool[b].clone(), v);
                        true
                    }
                    None => false,
                };
                prop_assert_eq!(moved, expected);
            }
            OpI::Iterate => {
                let keys: BTreeSet<_> = sut.key_iter().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(keys, m_keys);
                prop_assert_eq!(sut.key_iter().count(), model.len());
                let entries = sut.entries();
                let keys = sut.keys();
                let values = sut.values();
                for (i, (k, v)) in entries.into_iter().enumerate() {
                    prop_assert_eq!(keys[i], k);
                    prop_assert_eq!(values[i], v);
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), crate::MIN_CAPACITY);
            }
        }
        check_invariants(&sut, &model, &hasher)?;
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - put/get/remove/contains_key agree with the model, overwrites included.
// - len/is_empty parity; capacity is always on the ladder.
// - Every entry sits in slot `hash(key) % capacity` after each operation.
// - The three iterators yield the same entries in the same order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(pool, ops, HashTable::new, DeepHash)?;
    }
}

// Property: same invariants under a constant hash. Everything collides into
// one chain, so this leans on chain equality and resize relinking.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let zero: fn(&String) -> u32 = |_| 0;
        run_scenario(
            pool,
            ops,
            || HashTable::with_policy(HashWith(zero), DeepEquals),
            HashWith(zero),
        )?;
    }
}

// Property: capacity never drops below the minimum and shrinks back after
// the table is drained.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_drain_returns_to_minimum(n in 0usize..400) {
        let mut h: HashTable<usize, usize> = HashTable::new();
        for i in 0..n {
            h.put(i, i).unwrap();
        }
        let peak = h.capacity();
        for i in 0..n {
            prop_assert_eq!(h.remove(&i).unwrap(), Some(i));
            prop_assert!(h.capacity() <= peak);
            prop_assert!(h.capacity() >= crate::MIN_CAPACITY);
        }
        prop_assert!(h.capacity() <= crate::CAPACITY_TABLE[1]);
    }
}
