//! Structural (deep) hashing and equality, the table's defaults.
//!
//! Hashes are folded with small multiplicative mixers and kept within 31
//! bits. The fold for each shape is fixed so the same logical content always
//! produces the same hash across runs:
//!
//! - strings: seed 5381, `h = (h * 33) ^ unit` per UTF-16 code unit
//! - sequences: seed 6421, `h = (h * 37) ^ hash(item)`
//! - records: seed 3203, `h = (((h * 39) ^ hash(name)) * 43) ^ hash(value)`,
//!   fields visited in lexicographic name order

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

/// Keeps every hash a non-negative `i32`.
pub const HASH_MASK: u32 = (1 << 31) - 1;

/// Hash of an absent value nested inside a larger structure.
pub const ABSENT_HASH: u32 = 12345;
/// Hash of the null-like value.
pub const NULL_HASH: u32 = 54321;

const STRING_SEED: u32 = 5381;
const STRING_MUL: u32 = 33;
const SEQUENCE_SEED: u32 = 6421;
const SEQUENCE_MUL: u32 = 37;
const RECORD_SEED: u32 = 3203;
const RECORD_NAME_MUL: u32 = 39;
const RECORD_VALUE_MUL: u32 = 43;

/// Content-based hashing and equality.
///
/// Implementations must keep the two consistent: values that compare equal
/// under `structural_eq` must produce the same `structural_hash`.
pub trait Structural {
    fn structural_hash(&self) -> u32;
    fn structural_eq(&self, other: &Self) -> bool;
}

pub fn hash_str(s: &str) -> u32 {
    s.encode_utf16().fold(STRING_SEED, |h, unit| {
        (h.wrapping_mul(STRING_MUL) ^ u32::from(unit)) & HASH_MASK
    })
}

/// Folds item hashes in order; `[a, b]` and `[b, a]` usually differ.
pub fn hash_sequence<I>(hashes: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    hashes.into_iter().fold(SEQUENCE_SEED, |h, item| {
        (h.wrapping_mul(SEQUENCE_MUL) ^ item) & HASH_MASK
    })
}

/// Folds `(name, value hash)` pairs after sorting them by name, so field
/// order never affects the result.
pub fn hash_record<'a, I>(fields: I) -> u32
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let mut fields: Vec<_> = fields.into_iter().collect();
    fields.sort_unstable_by(|a, b| a.0.cmp(b.0));
    fields.into_iter().fold(RECORD_SEED, |h, (name, value)| {
        let h = (h.wrapping_mul(RECORD_NAME_MUL) ^ hash_str(name)).wrapping_mul(RECORD_VALUE_MUL);
        (h ^ value) & HASH_MASK
    })
}

/// Hash of a number: truncated to a wrapping 32-bit integer, then masked.
/// Non-finite numbers hash to zero.
pub fn hash_number(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    // rem_euclid keeps the truncated value in [0, 2^32), exactly.
    (n.trunc().rem_euclid(4_294_967_296.0) as u32) & HASH_MASK
}

macro_rules! structural_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Structural for $t {
                #[inline]
                fn structural_hash(&self) -> u32 {
                    (*self as u32) & HASH_MASK
                }
                #[inline]
                fn structural_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

structural_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Structural for bool {
    fn structural_hash(&self) -> u32 {
        u32::from(*self)
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Structural for f64 {
    fn structural_hash(&self) -> u32 {
        hash_number(*self)
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Structural for f32 {
    fn structural_hash(&self) -> u32 {
        hash_number(f64::from(*self))
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Structural for char {
    fn structural_hash(&self) -> u32 {
        let mut buf = [0u8; 4];
        hash_str(self.encode_utf8(&mut buf))
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Structural for str {
    fn structural_hash(&self) -> u32 {
        hash_str(self)
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Structural for String {
    fn structural_hash(&self) -> u32 {
        hash_str(self)
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Structural for () {
    fn structural_hash(&self) -> u32 {
        NULL_HASH
    }
    fn structural_eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T: Structural> Structural for Option<T> {
    fn structural_hash(&self) -> u32 {
        match self {
            Some(v) => v.structural_hash(),
            None => ABSENT_HASH,
        }
    }
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.structural_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Structural> Structural for [T] {
    fn structural_hash(&self) -> u32 {
        hash_sequence(self.iter().map(Structural::structural_hash))
    }
    fn structural_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.len() == other.len()
                && self.iter().zip(other).all(|(a, b)| a.structural_eq(b)))
    }
}

impl<T: Structural> Structural for Vec<T> {
    fn structural_hash(&self) -> u32 {
        self.as_slice().structural_hash()
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self.as_slice().structural_eq(other.as_slice())
    }
}

impl<T: Structural, const N: usize> Structural for [T; N] {
    fn structural_hash(&self) -> u32 {
        self.as_slice().structural_hash()
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self.as_slice().structural_eq(other.as_slice())
    }
}

impl<A: Structural, B: Structural> Structural for (A, B) {
    fn structural_hash(&self) -> u32 {
        hash_sequence([self.0.structural_hash(), self.1.structural_hash()])
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self.0.structural_eq(&other.0) && self.1.structural_eq(&other.1)
    }
}

impl<A: Structural, B: Structural, C: Structural> Structural for (A, B, C) {
    fn structural_hash(&self) -> u32 {
        hash_sequence([
            self.0.structural_hash(),
            self.1.structural_hash(),
            self.2.structural_hash(),
        ])
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self.0.structural_eq(&other.0)
            && self.1.structural_eq(&other.1)
            && self.2.structural_eq(&other.2)
    }
}

impl<T: Structural> Structural for BTreeMap<String, T> {
    fn structural_hash(&self) -> u32 {
        hash_record(self.iter().map(|(k, v)| (k.as_str(), v.structural_hash())))
    }
    fn structural_eq(&self, other: &Self) -> bool {
        // Names are unique, so equal sizes plus one-way containment covers
        // extra fields on either side.
        std::ptr::eq(self, other)
            || (self.len() == other.len()
                && self
                    .iter()
                    .all(|(k, v)| other.get(k).is_some_and(|o| v.structural_eq(o))))
    }
}

impl<T: Structural, S: BuildHasher> Structural for HashMap<String, T, S> {
    fn structural_hash(&self) -> u32 {
        hash_record(self.iter().map(|(k, v)| (k.as_str(), v.structural_hash())))
    }
    fn structural_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.len() == other.len()
                && self
                    .iter()
                    .all(|(k, v)| other.get(k).is_some_and(|o| v.structural_eq(o))))
    }
}

impl<T: Structural + ?Sized> Structural for &T {
    fn structural_hash(&self) -> u32 {
        (**self).structural_hash()
    }
    fn structural_eq(&self, other: &Self) -> bool {
        (**self).structural_eq(*other)
    }
}

impl<T: Structural + ?Sized> Structural for Box<T> {
    fn structural_hash(&self) -> u32 {
        (**self).structural_hash()
    }
    fn structural_eq(&self, other: &Self) -> bool {
        (**self).structural_eq(other)
    }
}

impl<T: Structural + ?Sized> Structural for Rc<T> {
    fn structural_hash(&self) -> u32 {
        (**self).structural_hash()
    }
    fn structural_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other) || (**self).structural_eq(other)
    }
}

impl<T: Structural + ?Sized> Structural for Arc<T> {
    fn structural_hash(&self) -> u32 {
        (**self).structural_hash()
    }
    fn structural_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other) || (**self).structural_eq(other)
    }
}
