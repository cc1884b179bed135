#![cfg(test)]

// Property tests for Dict kept inside the crate so they can check the
// bucket layout directly.

use crate::dict::{Dict, DictOptions};
use crate::error::DictError;
use crate::schedule;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Get(usize),
    Has(Vec<u8>),
    Del(usize),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..6), 1..=24).prop_flat_map(
        |pool| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let has_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
                2 => idx.clone().prop_map(OpI::Get),
                1 => prop_oneof![
                    has_pool,
                    proptest::collection::vec(any::<u8>(), 0..6)
                ]
                .prop_map(OpI::Has),
                2 => idx.clone().prop_map(OpI::Del),
                1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
                1 => Just(OpI::Clear),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
        },
    )
}

fn run_against_model<S: BuildHasher>(
    sut: &mut Dict<i32, S>,
    pool: &[Vec<u8>],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Vec<u8>, i32> = HashMap::new();
    let mut max_capacity = sut.capacity();

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = &pool[i];
                let prev = sut.set(k, v).expect("schedule has room");
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Has(k) => {
                prop_assert_eq!(sut.has(&k), model.contains_key(&k));
            }
            OpI::Del(i) => {
                let k = &pool[i];
                match model.remove(k) {
                    Some(mv) => prop_assert_eq!(sut.del(k), Ok(mv)),
                    None => prop_assert_eq!(sut.del(k), Err(DictError::NotFound)),
                }
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.saturating_add(d);
                    let mv = model.get_mut(k).expect("present in model");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
            OpI::Iterate => {
                let seen: BTreeMap<Vec<u8>, i32> =
                    sut.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
                let expected: BTreeMap<Vec<u8>, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(sut.iter().count(), model.len());
                prop_assert_eq!(seen, expected);
            }
        }

        // Post-conditions after each op
        // 1) Size parity
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // 2) Capacity is a schedule member, never shrinks, load limit holds
        prop_assert!(schedule::TABLE_SIZES.contains(&sut.capacity()));
        prop_assert!(sut.capacity() >= max_capacity);
        max_capacity = sut.capacity();
        prop_assert!(schedule::within_load_limit(sut.len(), sut.capacity()));
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `set` returns the previous value exactly when the model had one.
// - `get`/`has`/`del` parity with the model, including the empty key.
// - `iter` yields each live entry exactly once.
// - Capacity only moves forward through the schedule; load stays <= 0.75.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: Dict<i32> = Dict::new();
        run_against_model(&mut sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress chain handling.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher). Every entry shares one chain, so
// this exercises head/middle/tail unlinking and tail relinking on resize.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: Dict<i32, ConstBuildHasher> = Dict::with_hasher(ConstBuildHasher);
        run_against_model(&mut sut, &pool, ops)?;
    }
}

// Property: with a capped schedule, a refused insertion leaves the table
// exactly as it was.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_refused_insert_is_atomic(keys in proptest::collection::btree_set(any::<u32>(), 1..60)) {
        let mut sut: Dict<u32> = Dict::with_options(DictOptions { max_capacity: 37 });
        let mut inserted: Vec<u32> = Vec::new();
        for k in keys {
            let before: BTreeMap<Vec<u8>, u32> =
                sut.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
            let cap = sut.capacity();
            match sut.set(&k.to_be_bytes(), k) {
                Ok(prev) => {
                    prop_assert!(prev.is_none());
                    inserted.push(k);
                }
                Err(e) => {
                    prop_assert_eq!(e, DictError::CapacityExhausted { capacity: 37 });
                    prop_assert_eq!(cap, 37);
                    let after: BTreeMap<Vec<u8>, u32> =
                        sut.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
                    prop_assert_eq!(before, after);
                }
            }
            prop_assert_eq!(sut.len(), inserted.len());
        }
        // 37 * 0.75 = 27.75
        prop_assert!(sut.len() <= 27);
        for k in inserted {
            prop_assert_eq!(sut.get(&k.to_be_bytes()), Some(&k));
        }
    }
}
