//! Injected key behavior: how a table hashes keys and decides equality.

use crate::structural::{Structural, HASH_MASK};

/// Maps a key to a 32-bit hash. The table takes it modulo its capacity.
pub trait KeyHasher<K: ?Sized> {
    fn hash(&self, key: &K) -> u32;
}

/// Decides whether two keys are the same key.
///
/// Must be reflexive, symmetric and transitive, and agree with the paired
/// `KeyHasher`: keys that are equal must hash equally.
pub trait KeyEquals<K: ?Sized> {
    fn equals(&self, a: &K, b: &K) -> bool;
}

/// Default hasher: structural hash of the key's content.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeepHash;

impl<K: Structural + ?Sized> KeyHasher<K> for DeepHash {
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        key.structural_hash() & HASH_MASK
    }
}

/// Default equality: deep structural comparison.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeepEquals;

impl<K: Structural + ?Sized> KeyEquals<K> for DeepEquals {
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a.structural_eq(b)
    }
}

/// Adapts a closure `Fn(&K) -> u32` into a `KeyHasher`.
#[derive(Clone, Copy)]
pub struct HashWith<F>(pub F);

impl<K: ?Sized, F> KeyHasher<K> for HashWith<F>
where
    F: Fn(&K) -> u32,
{
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        (self.0)(key)
    }
}

/// Adapts a closure `Fn(&K, &K) -> bool` into a `KeyEquals`.
#[derive(Clone, Copy)]
pub struct EqualsWith<F>(pub F);

impl<K: ?Sized, F> KeyEquals<K> for EqualsWith<F>
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

/// Equality through the key's own `PartialEq`, for keys that already define
/// the comparison they need.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeEquals;

impl<K: PartialEq + ?Sized> KeyEquals<K> for NativeEquals {
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

impl<F> core::fmt::Debug for HashWith<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("HashWith(..)")
    }
}

impl<F> core::fmt::Debug for EqualsWith<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("EqualsWith(..)")
    }
}
