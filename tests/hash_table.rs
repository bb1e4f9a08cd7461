// HashTable integration test suite.
//
// Each test documents what behavior is being verified. The core invariants
// exercised:
// - Mapping: put then get returns the stored value; overwrites keep size.
// - Absence: absent keys/values are rejected without touching the table.
// - Structure: default hash/equality match keys by content, not identity.
// - Resizing: capacity follows the load-factor band and the capacity ladder.
// - Iteration: keys, values and entries cover every entry once, in one order.
use chained_hashtable::{
    DeepEquals, HashTable, HashWith, Record, RegexValue, TableConfig, TableError, Value,
    CAPACITY_TABLE, MIN_CAPACITY,
};
use std::collections::BTreeMap;

fn s(v: &str) -> Value {
    Value::from(v)
}

// Test: the worked example.
// Verifies: removing one of two keys leaves the other intact.
#[test]
fn put_two_remove_one() {
    let mut h = HashTable::new();
    h.put(1, "a").unwrap();
    h.put(2, "b").unwrap();
    h.remove(&1).unwrap();
    assert_eq!(h.size(), 1);
    assert_eq!(h.get(&1).unwrap(), None);
    assert_eq!(h.get(&2).unwrap(), Some(&"b"));
}

// Test: any shape of value works as a key or value.
// Verifies: empty records, records with fields and arrays all round-trip.
#[test]
fn accepts_any_value_shape() {
    let mut h: HashTable<Value, Value> = HashTable::new();
    h.put(Record::new().into(), s("xyz")).unwrap();
    assert_eq!(h.get(&Record::new().into()).unwrap(), Some(&s("xyz")));

    let list = Value::Array(vec![1.into(), 2.into(), 3.into()]);
    h.put(Record::new().with("a", 1).into(), list.clone()).unwrap();
    assert_eq!(
        h.get(&Record::new().with("a", 1).into()).unwrap(),
        Some(&list)
    );

    h.put(Record::new().with("x", "abc").with("y", 10).into(), 321.into())
        .unwrap();
    assert_eq!(
        h.get(&Record::new().with("y", 10).with("x", "abc").into())
            .unwrap(),
        Some(&Value::from(321))
    );
    assert_eq!(h.len(), 3);
}

// Test: overwriting replaces the value for structurally equal keys.
#[test]
fn replaces_value_of_existing_key() {
    let mut h: HashTable<Value, Value> = HashTable::new();
    h.put(Record::new().into(), s("a")).unwrap();
    h.put(Record::new().into(), s("b")).unwrap();
    assert_eq!(h.get(&Record::new().into()).unwrap(), Some(&s("b")));

    h.put(123.into(), s("a")).unwrap();
    h.put(123.into(), s("b")).unwrap();
    assert_eq!(h.get(&123.into()).unwrap(), Some(&s("b")));
    assert_eq!(h.len(), 2);
}

// Test: the absent value is refused everywhere.
// Verifies: InvalidArgument for key and value; size untouched.
#[test]
fn absent_key_or_value_is_an_error() {
    let mut h: HashTable<Value, Value> = HashTable::new();
    assert!(matches!(
        h.put(Value::Undefined, 1.into()),
        Err(TableError::InvalidArgument { what: "key", .. })
    ));
    assert!(matches!(
        h.put(1.into(), Value::Undefined),
        Err(TableError::InvalidArgument { what: "value", .. })
    ));
    assert!(h.get(&Value::Undefined).is_err());
    assert!(h.remove(&Value::Undefined).is_err());
    assert!(h.contains_key(&Value::Undefined).is_err());
    assert!(h.is_empty());
}

// Test: lookups of missing keys of various types.
#[test]
fn missing_keys_are_absent() {
    let h: HashTable<Value, Value> = HashTable::new();
    assert_eq!(h.get(&123.into()).unwrap(), None);
    assert_eq!(h.get(&s("123")).unwrap(), None);
    assert_eq!(h.get(&Value::Array(vec![123.into()])).unwrap(), None);
    assert!(!h.contains_key(&123.into()).unwrap());
}

// Test: removing a missing key is a quiet no-op.
#[test]
fn remove_missing_is_idempotent() {
    let mut h = HashTable::new();
    h.put(1, 1).unwrap();
    assert_eq!(h.remove(&123).unwrap(), None);
    assert_eq!(h.remove(&123).unwrap(), None);
    assert_eq!(h.len(), 1);
}

// Test: chain correctness does not depend on hash quality.
// Assumes: a constant hash sends every key into one chain.
#[test]
fn constant_hash_put_get_remove() {
    let mut h = TableConfig::new()
        .hash(|_: &i32| 0u32)
        .build::<i32, i32>();
    for i in 0..10 {
        h.put(i, i + 10).unwrap();
    }
    for i in 0..10 {
        assert_eq!(h.get(&i).unwrap(), Some(&(i + 10)));
    }

    let mut h = HashTable::with_policy(HashWith(|_: &i32| 0u32), DeepEquals);
    for i in 0..3 {
        h.put(i, i + 10).unwrap();
    }
    h.remove(&1).unwrap();
    assert_eq!(h.get(&0).unwrap(), Some(&10));
    assert_eq!(h.get(&1).unwrap(), None);
    assert_eq!(h.get(&2).unwrap(), Some(&12));
}

// Test: capacity tracks the load-factor band.
// Verifies: growth above 0.75, shrink below 0.25, floor at the minimum.
#[test]
fn capacity_follows_load() {
    let mut h = HashTable::new();
    let mut last = h.capacity();
    for i in 0..1000 {
        h.put(i, i).unwrap();
        assert!(h.capacity() >= last);
        assert!(CAPACITY_TABLE.contains(&h.capacity()));
        last = h.capacity();
    }
    assert!(last > MIN_CAPACITY);
    for i in 0..1000 {
        h.remove(&i).unwrap();
        assert!(h.capacity() <= last);
        last = h.capacity();
    }
    assert_eq!(h.capacity(), MIN_CAPACITY);
}

// Test: the initial capacity hint is rounded up to the ladder.
#[test]
fn initial_capacity_hint() {
    let h: HashTable<i32, i32> = HashTable::with_capacity(1000);
    assert_eq!(h.capacity(), 1597);
    let h: HashTable<i32, i32> = HashTable::with_capacity(1);
    assert_eq!(h.capacity(), MIN_CAPACITY);
}

// Test: the three iterators agree.
// Verifies: entries()[i] == (keys()[i], values()[i]) and all have n items.
#[test]
fn iterators_are_complete_and_aligned() {
    let mut h = HashTable::new();
    for i in 0..200u32 {
        h.put(format!("k{i}"), i).unwrap();
    }
    let keys = h.keys();
    let values = h.values();
    let entries = h.entries();
    assert_eq!(keys.len(), 200);
    assert_eq!(values.len(), 200);
    assert_eq!(entries.len(), 200);
    for (i, (k, v)) in entries.iter().enumerate() {
        assert_eq!(keys[i], *k);
        assert_eq!(values[i], *v);
        assert_eq!(**k, format!("k{v}"));
    }
}

// Test: the cursor-style API.
// Verifies: has_next/try_next drain exactly len items, then error.
#[test]
fn cursor_api_drains_then_errors() {
    let mut h = HashTable::new();
    for i in 0..7 {
        h.put(i, i).unwrap();
    }
    let mut it = h.entry_iter();
    let mut n = 0;
    while it.has_next() {
        let (k, v) = it.try_next().unwrap();
        assert_eq!(k, v);
        n += 1;
    }
    assert_eq!(n, 7);
    assert_eq!(it.try_next(), Err(TableError::ExhaustedIterator("Entries")));

    let mut count = 0;
    h.value_iter().each(|_, i| {
        assert_eq!(i, count);
        count += 1;
    });
    assert_eq!(count, 7);
}

// Test: std collections of strings act as records.
#[test]
fn btree_maps_as_record_keys() {
    let mut a = BTreeMap::new();
    a.insert("x".to_string(), 1);
    a.insert("y".to_string(), 2);
    let mut h = HashTable::new();
    h.put(a.clone(), "a").unwrap();
    let mut b = BTreeMap::new();
    b.insert("y".to_string(), 2);
    b.insert("x".to_string(), 1);
    assert_eq!(h.get(&b).unwrap(), Some(&"a"));
    b.insert("z".to_string(), 3);
    assert_eq!(h.get(&b).unwrap(), None);
}

// Test: dates and regexes compare by instant and by pattern/flags.
#[test]
fn dates_and_regexes_as_keys() {
    let mut h: HashTable<Value, Value> = HashTable::new();
    h.put(Value::Date(1_700_000_000_000), s("then")).unwrap();
    h.put(RegexValue::new("^a+$", "gi").into(), s("re")).unwrap();
    assert_eq!(
        h.get(&Value::Date(1_700_000_000_000)).unwrap(),
        Some(&s("then"))
    );
    assert_eq!(
        h.get(&RegexValue::new("^a+$", "ig").into()).unwrap(),
        Some(&s("re"))
    );
    assert_eq!(h.get(&RegexValue::new("^a+$", "g").into()).unwrap(), None);
}

// Test: record kinds keep otherwise identical records apart.
#[test]
fn record_kinds_are_distinct_keys() {
    let mut h: HashTable<Value, Value> = HashTable::new();
    h.put(Record::of_kind("Point").with("x", 1).into(), s("p"))
        .unwrap();
    h.put(Record::of_kind("Size").with("x", 1).into(), s("s"))
        .unwrap();
    assert_eq!(h.len(), 2);
}

// Test: clear resets both content and capacity.
#[test]
fn clear_empties_table() {
    let mut h = HashTable::new();
    for i in 0..100 {
        h.put(i, i).unwrap();
    }
    h.clear();
    assert!(h.is_empty());
    assert_eq!(h.capacity(), MIN_CAPACITY);
    assert_eq!(h.keys().len(), 0);
}

// Test: explicit re-keying.
#[test]
fn rehash_key_relocates_entry() {
    let mut h: HashTable<Value, Value> = HashTable::new();
    let before: Value = Record::new().with("id", 1).into();
    let after: Value = Record::new().with("id", 2).into();
    h.put(before.clone(), s("payload")).unwrap();
    assert!(h.rehash_key(&before, after.clone()).unwrap());
    assert_eq!(h.get(&before).unwrap(), None);
    assert_eq!(h.get(&after).unwrap(), Some(&s("payload")));
}
