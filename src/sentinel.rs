//! The "absent value" marker that may never be stored in a table.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

/// Types that can represent "no value".
///
/// The table refuses to store an absent key or value and reports
/// `TableError::InvalidArgument` instead. Most types have no absent state,
/// so the default method answers `false`; `Option::None` and
/// `Value::Undefined` are the absent values shipped with this crate.
///
/// Custom key types only need an empty impl:
///
/// ```
/// # use chained_hashtable::Sentinel;
/// struct Point { x: i32, y: i32 }
/// impl Sentinel for Point {}
/// ```
pub trait Sentinel {
    fn is_absent(&self) -> bool {
        false
    }
}

macro_rules! never_absent {
    ($($t:ty),* $(,)?) => {
        $(impl Sentinel for $t {})*
    };
}

never_absent!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String, ()
);

impl<T> Sentinel for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T> Sentinel for [T] {}
impl<T> Sentinel for Vec<T> {}
impl<T, const N: usize> Sentinel for [T; N] {}
impl<K, V> Sentinel for BTreeMap<K, V> {}
impl<K, V, S> Sentinel for HashMap<K, V, S> {}
impl<A, B> Sentinel for (A, B) {}
impl<A, B, C> Sentinel for (A, B, C) {}

impl<T: Sentinel + ?Sized> Sentinel for &T {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Sentinel + ?Sized> Sentinel for Box<T> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Sentinel + ?Sized> Sentinel for Rc<T> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Sentinel + ?Sized> Sentinel for Arc<T> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}
