//! chained-hashtable: a general-purpose, single-threaded hashtable with
//! pluggable hash and equality, automatic growth and shrinkage, and key,
//! value and entry iterators.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: O(1) amortized put/get/remove under uniform hashing, correct
//!   lookups for keys that are structurally equal but not identical, and a
//!   deterministic single pass over all entries.
//! - Layers:
//!   - capacity: the fixed ladder of slot-array sizes and the binary search
//!     that turns a capacity hint into a ladder index.
//!   - structural / value: the default deep hash and deep equality, for
//!     ordinary Rust types and for the dynamically typed `Value`.
//!   - chain: singly linked entries behind one slot. Equality is passed in
//!     per call; chains own no policy.
//!   - HashTable: the slot array, entry count and ladder index. Routes keys
//!     to `hash(key) % capacity`, delegates to chains, and resizes when the
//!     load factor leaves `[0.25, 0.75]`.
//!
//! Constraints
//! - Capacities are never powers of two, so slots are picked by division,
//!   not masking.
//! - Resize relinks existing chain nodes into the new slot array. It runs no
//!   equality checks because keys are already unique.
//! - Chains are allocated on first insert into a slot and only discarded by
//!   `clear` or a resize; a chain emptied by removals stays in place.
//! - Neither key nor value may be absent (`Sentinel::is_absent`); such calls
//!   fail with `TableError::InvalidArgument` and change nothing.
//!
//! Iteration
//! - Slot order, then chain order (newest entry of a slot first). That order
//!   is an implementation detail, not a guarantee.
//! - Iterators borrow the table, so the borrow checker rules out mutation
//!   during iteration.
//!
//! Notes and non-goals
//! - Not thread-safe by itself; share behind a lock if needed.
//! - Keys are immutable once stored. To change a key, call
//!   `HashTable::rehash_key`.
//! - Structural hashing of cyclic data is not supported; `Value` cannot
//!   express cycles.

mod capacity;
mod chain;
mod config;
mod error;
mod hash_table;
mod hash_table_proptest;
mod iter;
mod policy;
mod sentinel;
mod structural;
mod value;

// Public surface
pub use capacity::{
    capacity_at, index_for_desired, CAPACITY_TABLE, DEFAULT_INITIAL_INDEX, MAX_CAPACITY,
    MIN_CAPACITY,
};
pub use config::{LoadFactors, TableConfig, LF_HIGH, LF_LOW};
pub use error::TableError;
pub use hash_table::HashTable;
pub use iter::{Entries, Keys, Values};
pub use policy::{DeepEquals, DeepHash, EqualsWith, HashWith, KeyEquals, KeyHasher, NativeEquals};
pub use sentinel::Sentinel;
pub use structural::{
    hash_number, hash_record, hash_sequence, hash_str, Structural, ABSENT_HASH, HASH_MASK,
    NULL_HASH,
};
pub use value::{Record, RegexValue, Value, DEFAULT_RECORD_KIND};
