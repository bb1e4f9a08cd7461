//! HashTable: separate chaining over a prime-ish capacity ladder.

use crate::capacity::{capacity_at, CAPACITY_TABLE, DEFAULT_INITIAL_INDEX};
use crate::chain::Chain;
use crate::config::{LoadFactors, TableConfig};
use crate::error::TableError;
use crate::iter::{Entries, Keys, RawIter, Values};
use crate::policy::{DeepEquals, DeepHash, KeyEquals, KeyHasher};
use crate::sentinel::Sentinel;
use crate::structural::Structural;
use log::{debug, trace, warn};

/// A key-value table with pluggable hash (`H`) and equality (`E`).
///
/// Entries live in per-slot chains at `hash(key) % capacity`. The capacity
/// is always one entry of `CAPACITY_TABLE`; the table grows one step when
/// an insert pushes `len / capacity` above the high load factor and shrinks
/// one step when a removal drops it below the low one.
///
/// With the defaults, keys are hashed and compared by content, so records
/// built independently with the same fields find each other.
pub struct HashTable<K, V, H = DeepHash, E = DeepEquals> {
    slots: Vec<Option<Chain<K, V>>>,
    len: usize,
    capacity_index: usize,
    hasher: H,
    equals: E,
    load_factors: LoadFactors,
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Option<Chain<K, V>>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<K, V> HashTable<K, V>
where
    K: Structural,
{
    pub fn new() -> Self {
        TableConfig::new().build()
    }

    /// Starts at the smallest capacity that is at least `wanted`.
    pub fn with_capacity(wanted: usize) -> Self {
        TableConfig::new().initial_capacity(wanted).build()
    }

    pub fn builder() -> TableConfig {
        TableConfig::new()
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Structural,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H, E> HashTable<K, V, H, E> {
    pub(crate) fn from_parts(
        capacity_index: usize,
        hasher: H,
        equals: E,
        load_factors: LoadFactors,
    ) -> Self {
        Self {
            slots: empty_slots(CAPACITY_TABLE[capacity_index]),
            len: 0,
            capacity_index,
            hasher,
            equals,
            load_factors,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Same as `len`.
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    pub fn load_factors(&self) -> LoadFactors {
        self.load_factors
    }

    /// Drops every entry and returns to the default initial capacity.
    pub fn clear(&mut self) {
        self.capacity_index = DEFAULT_INITIAL_INDEX;
        self.slots = empty_slots(CAPACITY_TABLE[DEFAULT_INITIAL_INDEX]);
        self.len = 0;
    }

    /// Iterates keys in slot order, newest first within a slot.
    pub fn key_iter(&self) -> Keys<'_, K, V> {
        Keys::new(self.raw_iter())
    }

    /// Iterates values in the same order as `key_iter`.
    pub fn value_iter(&self) -> Values<'_, K, V> {
        Values::new(self.raw_iter())
    }

    /// Iterates `(key, value)` pairs in the same order as `key_iter`.
    pub fn entry_iter(&self) -> Entries<'_, K, V> {
        Entries::new(self.raw_iter())
    }

    pub fn iter(&self) -> Entries<'_, K, V> {
        self.entry_iter()
    }

    pub fn keys(&self) -> Vec<&K> {
        self.key_iter().collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.value_iter().collect()
    }

    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.entry_iter().collect()
    }

    fn raw_iter(&self) -> RawIter<'_, K, V> {
        RawIter::new(&self.slots, self.len)
    }

    /// True if the chain at `slot` holds this exact key (by address).
    #[cfg(test)]
    pub(crate) fn slot_holds(&self, slot: usize, key: &K) -> bool {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .is_some_and(|chain| chain.iter().any(|node| std::ptr::eq(&node.key, key)))
    }
}

impl<K, V, H, E> HashTable<K, V, H, E>
where
    H: KeyHasher<K>,
    E: KeyEquals<K>,
{
    pub fn with_policy(hasher: H, equals: E) -> Self {
        TableConfig::new().hasher(hasher).equality(equals).build()
    }

    #[inline]
    fn slot_index(&self, key: &K) -> usize {
        self.hasher.hash(key) as usize % self.slots.len()
    }

    /// Moves every entry into a slot array sized for `to_index`.
    ///
    /// `None` means the caller is already at the smallest capacity and the
    /// call does nothing. Nodes are relinked, not rebuilt, and no equality
    /// checks run: keys were unique before the move and stay unique.
    fn resize(&mut self, to_index: Option<usize>) -> Result<(), TableError> {
        let Some(to_index) = to_index else {
            return Ok(());
        };
        let new_capacity = capacity_at(to_index)?;
        debug!(
            "resizing hashtable from {} to {} slots ({} entries)",
            self.slots.len(),
            new_capacity,
            self.len
        );

        let old_slots = std::mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.capacity_index = to_index;
        for mut chain in old_slots.into_iter().flatten() {
            while let Some(node) = chain.pop_front() {
                let index = self.hasher.hash(&node.key) as usize % new_capacity;
                self.slots[index]
                    .get_or_insert_with(Chain::new)
                    .insert_front(node);
            }
        }
        Ok(())
    }
}

impl<K, V, H, E> HashTable<K, V, H, E>
where
    K: Sentinel,
    V: Sentinel,
    H: KeyHasher<K>,
    E: KeyEquals<K>,
{
    /// Stores `value` under `key`, replacing the value of an equal key.
    ///
    /// Fails with `InvalidArgument` for an absent key or value, and with
    /// `CapacityExceeded` if the insert would need to grow past
    /// `MAX_CAPACITY`; in both cases the table is left untouched.
    pub fn put(&mut self, key: K, value: V) -> Result<(), TableError> {
        if key.is_absent() {
            return Err(TableError::absent_key("put"));
        }
        if value.is_absent() {
            return Err(TableError::absent_value("put"));
        }

        let index = self.slot_index(&key);
        let chain = self.slots[index].get_or_insert_with(|| {
            trace!("allocating chain for slot {index}");
            Chain::new()
        });
        if !chain.put(&self.equals, key, value) {
            return Ok(());
        }

        self.len += 1;
        if self.load_factor() > self.load_factors.high {
            if let Err(err) = self.resize(Some(self.capacity_index + 1)) {
                warn!("refusing insert into full hashtable ({} entries)", self.len - 1);
                // The failed resize left the slots alone, so the new entry is
                // still the head of its chain.
                if let Some(chain) = self.slots[index].as_mut() {
                    chain.pop_front();
                }
                self.len -= 1;
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &K) -> Result<Option<&V>, TableError> {
        if key.is_absent() {
            return Err(TableError::absent_key("get"));
        }
        Ok(self.slots[self.slot_index(key)]
            .as_ref()
            .and_then(|chain| chain.find(&self.equals, key))
            .map(|node| &node.value))
    }

    pub fn get_mut(&mut self, key: &K) -> Result<Option<&mut V>, TableError> {
        if key.is_absent() {
            return Err(TableError::absent_key("get_mut"));
        }
        let index = self.slot_index(key);
        Ok(self.slots[index]
            .as_mut()
            .and_then(|chain| chain.find_mut(&self.equals, key))
            .map(|node| &mut node.value))
    }

    pub fn contains_key(&self, key: &K) -> Result<bool, TableError> {
        if key.is_absent() {
            return Err(TableError::absent_key("contains_key"));
        }
        Ok(self.get(key)?.is_some())
    }

    /// Removes the entry for `key`, returning its value. Removing a missing
    /// key is not an error.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>, TableError> {
        if key.is_absent() {
            return Err(TableError::absent_key("remove"));
        }
        let index = self.slot_index(key);
        let Some(chain) = self.slots[index].as_mut() else {
            return Ok(None);
        };
        let Some((_, value)) = chain.remove(&self.equals, key) else {
            return Ok(None);
        };

        self.len -= 1;
        if self.load_factor() < self.load_factors.low {
            // Shrinking never fails; at the floor it is a no-op.
            self.resize(self.capacity_index.checked_sub(1))?;
        }
        Ok(Some(value))
    }

    /// Moves the value stored under `old_key` to `new_key`, replacing any
    /// value already stored there. Returns whether `old_key` was present.
    ///
    /// This is the explicit way to re-bucket an entry whose logical key
    /// changed; keys are never mutated in place.
    pub fn rehash_key(&mut self, old_key: &K, new_key: K) -> Result<bool, TableError> {
        if old_key.is_absent() || new_key.is_absent() {
            return Err(TableError::absent_key("rehash_key"));
        }
        match self.remove(old_key)? {
            Some(value) => {
                self.put(new_key, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Puts every pair, stopping at the first error. Pairs before the
    /// failing one stay in the table.
    pub fn try_extend<I>(&mut self, pairs: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.put(key, value)?;
        }
        Ok(())
    }
}

impl<'a, K, V, H, E> IntoIterator for &'a HashTable<K, V, H, E> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entry_iter()
    }
}

impl<K, V, H, E> core::fmt::Debug for HashTable<K, V, H, E>
where
    K: core::fmt::Debug,
    V: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
