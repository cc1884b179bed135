// Dict integration test suite.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Round-trip: set then get/has observe the value until delete/overwrite.
// - Size: overwrite leaves len unchanged; delete shrinks it by exactly one.
// - Growth: capacity steps through schedule primes, load stays <= 0.75.
// - Clear: len drops to zero, capacity is retained.
// - Iteration: a full pass yields each live entry once.
use chained_dict::schedule::{TABLE_SIZES, within_load_limit};
use chained_dict::{Dict, DictError, DictOptions};
use std::collections::BTreeSet;

// Test: the key1..key9 scenario.
// Verifies: size after inserts and deletes, presence, and lookup values.
#[test]
fn nine_keys_then_delete_four() {
    let mut d = Dict::new();
    for i in 1..=9 {
        let key = format!("key{i}");
        assert_eq!(key.len(), 4);
        d.set(key.as_bytes(), i).expect("set");
    }
    assert_eq!(d.len(), 9);
    for i in 1..=9 {
        let key = format!("key{i}");
        assert_eq!(d.get(key.as_bytes()), Some(&i));
        assert!(d.has(key.as_bytes()));
    }

    for i in 1..=4 {
        let key = format!("key{i}");
        assert_eq!(d.del(key.as_bytes()), Ok(i));
    }
    assert_eq!(d.len(), 5);
    assert!(!d.has(b"key1"));
    assert!(!d.has(b"key4"));
    assert!(d.has(b"key5"));
    assert_eq!(d.get(b"key5"), Some(&5));

    let rest: BTreeSet<Vec<u8>> = d.keys().map(|k| k.to_vec()).collect();
    let expected: BTreeSet<Vec<u8>> = (5..=9).map(|i| format!("key{i}").into_bytes()).collect();
    assert_eq!(rest, expected);
}

// Test: overwrite semantics.
// Verifies: the last value wins, the previous one is handed back, len is unchanged.
#[test]
fn overwrite_replaces_value() {
    let mut d = Dict::new();
    assert_eq!(d.set(b"k", "v1"), Ok(None));
    assert_eq!(d.set(b"k", "v2"), Ok(Some("v1")));
    assert_eq!(d.len(), 1);
    assert_eq!(d.get(b"k"), Some(&"v2"));
}

// Test: deleting an absent key.
// Verifies: NotFound is returned and the table is unchanged.
#[test]
fn delete_missing_reports_not_found() {
    let mut d = Dict::new();
    d.set(b"present", 1).unwrap();
    assert_eq!(d.del(b"absent"), Err(DictError::NotFound));
    assert!(!DictError::NotFound.is_allocation());
    assert_eq!(d.len(), 1);
    assert_eq!(d.get(b"present"), Some(&1));

    // Deleting twice: the second attempt is a miss.
    assert_eq!(d.del(b"present"), Ok(1));
    assert_eq!(d.del(b"present"), Err(DictError::NotFound));
    assert!(d.is_empty());
}

// Test: keys are compared byte-for-byte, including embedded zeros and
// non-UTF-8 content.
#[test]
fn binary_keys() {
    let mut d = Dict::new();
    let keys: [&[u8]; 5] = [b"", b"\0", b"\0\0", b"a\0b", &[0xFF, 0xFE, 0x00]];
    for (i, k) in keys.iter().enumerate() {
        d.set(k, i).unwrap();
    }
    assert_eq!(d.len(), keys.len());
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(d.get(k), Some(&i));
    }
    assert!(!d.has(b"a"));
    assert!(!d.has(b"a\0"));
}

// Test: the table copies key bytes.
// Verifies: mutating or dropping the caller's buffer does not affect lookups.
#[test]
fn keys_are_copied() {
    let mut d = Dict::new();
    let mut buf = b"mutable".to_vec();
    d.set(&buf, 7).unwrap();
    buf[0] = b'M';
    assert_eq!(d.get(b"mutable"), Some(&7));
    assert_eq!(d.get(&buf), None);
    drop(buf);
    assert_eq!(d.keys().next(), Some(&b"mutable"[..]));
}

// Test: growth across many stages.
// Assumes: distinct keys.
// Verifies: load limit after every set, capacity is a schedule prime and
// monotone, and all contents survive every resize.
#[test]
fn growth_preserves_contents_and_load_limit() {
    let mut d = Dict::new();
    let mut last_cap = d.capacity();
    let mut resizes = 0;
    for i in 0..20_000u32 {
        let key = format!("k{:08x}", i.wrapping_mul(2654435761));
        d.set(key.as_bytes(), i).unwrap();
        assert!(within_load_limit(d.len(), d.capacity()));
        assert!(TABLE_SIZES.contains(&d.capacity()));
        if d.capacity() != last_cap {
            assert!(d.capacity() > last_cap);
            assert_eq!(TABLE_SIZES[d.stage()], d.capacity());
            assert_eq!(TABLE_SIZES[d.stage() - 1], last_cap);
            last_cap = d.capacity();
            resizes += 1;
        }
    }
    assert!(resizes >= 8);
    assert_eq!(d.len(), 20_000);
    for i in 0..20_000u32 {
        let key = format!("k{:08x}", i.wrapping_mul(2654435761));
        assert_eq!(d.get(key.as_bytes()), Some(&i));
    }
    assert!(d.load_factor() <= 0.75);
}

// Test: deletions never shrink the table.
#[test]
fn delete_never_shrinks() {
    let mut d = Dict::new();
    for i in 0..100u32 {
        d.set(&i.to_le_bytes(), i).unwrap();
    }
    let cap = d.capacity();
    for i in 0..100u32 {
        d.del(&i.to_le_bytes()).unwrap();
    }
    assert!(d.is_empty());
    assert_eq!(d.capacity(), cap);
}

// Test: clear resets size but not capacity.
#[test]
fn clear_resets_size_only() {
    let mut d = Dict::new();
    for i in 0..40u32 {
        d.set(format!("key{i}").as_bytes(), i).unwrap();
    }
    let cap = d.capacity();
    assert!(cap > 7);
    d.clear();
    assert_eq!(d.len(), 0);
    assert_eq!(d.iter().count(), 0);
    for i in 0..40u32 {
        assert_eq!(d.get(format!("key{i}").as_bytes()), None);
    }
    d.set(b"fresh", 1).unwrap();
    assert_eq!(d.capacity(), cap);
}

// Test: iteration completeness and reset.
// Verifies: N distinct inserts yield exactly N unique pairs matching inserts;
// after reset the same pass is produced again.
#[test]
fn iteration_completeness() {
    let mut d = Dict::new();
    let n = 257u32;
    for i in 0..n {
        d.set(&i.to_be_bytes(), i).unwrap();
    }
    let mut it = d.iter();
    let mut seen = BTreeSet::new();
    let mut first_pass = Vec::new();
    for (k, v) in it.by_ref() {
        let arr: [u8; 4] = k.try_into().expect("4-byte key");
        assert_eq!(u32::from_be_bytes(arr), *v);
        assert!(seen.insert(*v));
        first_pass.push(*v);
    }
    assert_eq!(seen.len(), n as usize);
    assert!(it.next().is_none());

    it.reset();
    let second_pass: Vec<u32> = it.map(|(_, v)| *v).collect();
    assert_eq!(first_pass, second_pass);
}

// Test: capped schedule.
// Verifies: growth stops at the largest prime within the cap and the
// refused insertion is reported as an allocation-class error.
#[test]
fn capped_growth_refuses_insert() {
    let mut d = Dict::with_options(DictOptions { max_capacity: 100 });
    let mut refused = None;
    for i in 0..100u32 {
        if let Err(e) = d.set(&i.to_le_bytes(), i) {
            refused = Some((i, e));
            break;
        }
    }
    let (at, err) = refused.expect("cap must be reached");
    assert_eq!(d.capacity(), 79);
    assert_eq!(err, DictError::CapacityExhausted { capacity: 79 });
    assert!(err.is_allocation());
    // 79 * 0.75 = 59.25
    assert_eq!(at, 59);
    assert_eq!(d.len(), 59);
    assert!(!d.has(&at.to_le_bytes()));
}

// Test: a cap below the first prime still yields a working table.
#[test]
fn tiny_cap_keeps_first_stage() {
    let mut d = Dict::with_options(DictOptions { max_capacity: 1 });
    assert_eq!(d.capacity(), 7);
    for i in 0..5u8 {
        d.set(&[i], i).unwrap();
    }
    assert_eq!(
        d.set(&[5], 5),
        Err(DictError::CapacityExhausted { capacity: 7 })
    );
}

// Test: error messages.
#[test]
fn error_display() {
    assert_eq!(DictError::NotFound.to_string(), "[Dict]Key Not Found");
    assert_eq!(
        DictError::CapacityExhausted { capacity: 7 }.to_string(),
        "[Dict]Capacity Exhausted At 7 Buckets"
    );
    assert_eq!(DictError::AllocationFailed.to_string(), "[Dict]Allocation Failed");
}
