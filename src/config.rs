//! Construction-time configuration for `HashTable`.

use crate::capacity::{index_for_desired, DEFAULT_INITIAL_INDEX};
use crate::hash_table::HashTable;
use crate::policy::{DeepEquals, DeepHash, EqualsWith, HashWith, KeyEquals, KeyHasher};

/// Default lower load-factor bound; a removal that drops below it shrinks.
pub const LF_LOW: f64 = 0.25;
/// Default upper load-factor bound; an insert that climbs above it grows.
pub const LF_HIGH: f64 = 0.75;

/// The `[low, high]` band the table keeps `len / capacity` inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadFactors {
    pub low: f64,
    pub high: f64,
}

impl Default for LoadFactors {
    fn default() -> Self {
        Self {
            low: LF_LOW,
            high: LF_HIGH,
        }
    }
}

/// Builder for `HashTable`.
///
/// `hash` and `equals` swap in new policy types, so the finished table is
/// statically dispatched. Supplying only one of them is allowed, but the two
/// must agree: keys that are equal have to hash equally.
///
/// ```
/// use chained_hashtable::TableConfig;
///
/// let mut h = TableConfig::new()
///     .initial_capacity(100)
///     .hash(|k: &String| k.to_ascii_lowercase().len() as u32)
///     .equals(|a: &String, b: &String| a.eq_ignore_ascii_case(b))
///     .build::<String, i32>();
/// h.put("Key".to_string(), 1).unwrap();
/// assert_eq!(h.get(&"KEY".to_string()).unwrap(), Some(&1));
/// assert_eq!(h.capacity(), 197);
/// ```
#[derive(Clone, Debug)]
pub struct TableConfig<H = DeepHash, E = DeepEquals> {
    initial_capacity: Option<usize>,
    hasher: H,
    equals: E,
    load_factors: LoadFactors,
}

impl TableConfig {
    pub fn new() -> Self {
        Self {
            initial_capacity: None,
            hasher: DeepHash,
            equals: DeepEquals,
            load_factors: LoadFactors::default(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, E> TableConfig<H, E> {
    /// Hint for the starting slot count; rounded up to the capacity table.
    pub fn initial_capacity(mut self, wanted: usize) -> Self {
        self.initial_capacity = Some(wanted);
        self
    }

    /// Uses `f` as the key hash.
    pub fn hash<F>(self, f: F) -> TableConfig<HashWith<F>, E> {
        self.hasher(HashWith(f))
    }

    /// Uses `f` as the key equality.
    pub fn equals<F>(self, f: F) -> TableConfig<H, EqualsWith<F>> {
        self.equality(EqualsWith(f))
    }

    /// Uses a prepared `KeyHasher`.
    pub fn hasher<H2>(self, hasher: H2) -> TableConfig<H2, E> {
        TableConfig {
            initial_capacity: self.initial_capacity,
            hasher,
            equals: self.equals,
            load_factors: self.load_factors,
        }
    }

    /// Uses a prepared `KeyEquals`.
    pub fn equality<E2>(self, equals: E2) -> TableConfig<H, E2> {
        TableConfig {
            initial_capacity: self.initial_capacity,
            hasher: self.hasher,
            equals,
            load_factors: self.load_factors,
        }
    }

    /// Overrides the shrink/grow thresholds.
    ///
    /// # Panics
    ///
    /// Panics unless `0.0 <= low < high`.
    pub fn load_factors(mut self, low: f64, high: f64) -> Self {
        assert!(
            (0.0..high).contains(&low),
            "load factors must satisfy 0 <= low < high (got {low}, {high})"
        );
        self.load_factors = LoadFactors { low, high };
        self
    }

    pub fn build<K, V>(self) -> HashTable<K, V, H, E>
    where
        H: KeyHasher<K>,
        E: KeyEquals<K>,
    {
        let index = self
            .initial_capacity
            .map_or(DEFAULT_INITIAL_INDEX, index_for_desired);
        HashTable::from_parts(index, self.hasher, self.equals, self.load_factors)
    }
}
