//! Key, value and entry iterators.
//!
//! All three share one cursor that walks the slot array in ascending order
//! and each chain front to back. An iterator borrows its table, so the table
//! cannot change underneath it.

use crate::chain::{Chain, Node};
use crate::error::TableError;
use core::iter::FusedIterator;

enum Cursor<'a, K, V> {
    /// Next candidate slot; may be empty.
    AtSlot(usize),
    /// Positioned on an entry that has not been yielded yet.
    InChain {
        slot: usize,
        node: &'a Node<K, V>,
    },
    Exhausted,
}

pub(crate) struct RawIter<'a, K, V> {
    slots: &'a [Option<Chain<K, V>>],
    cursor: Cursor<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> RawIter<'a, K, V> {
    pub(crate) fn new(slots: &'a [Option<Chain<K, V>>], len: usize) -> Self {
        Self {
            slots,
            cursor: Cursor::AtSlot(0),
            remaining: len,
        }
    }

    /// Advances past missing and empty chains until the cursor rests on an
    /// entry or runs off the end. Returns whether an entry is available.
    fn settle(&mut self) -> bool {
        loop {
            match self.cursor {
                Cursor::InChain { .. } => return true,
                Cursor::Exhausted => return false,
                Cursor::AtSlot(slot) => {
                    self.cursor = match self.slots.get(slot) {
                        None => Cursor::Exhausted,
                        Some(chain) => match chain.as_ref().and_then(|c| c.head()) {
                            Some(node) => Cursor::InChain { slot, node },
                            None => Cursor::AtSlot(slot + 1),
                        },
                    };
                }
            }
        }
    }

    #[inline]
    pub(crate) fn has_next(&mut self) -> bool {
        self.settle()
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a Node<K, V>> {
        if !self.settle() {
            return None;
        }
        let Cursor::InChain { slot, node } = self.cursor else {
            return None;
        };
        self.cursor = match node.next() {
            Some(next) => Cursor::InChain { slot, node: next },
            None => Cursor::AtSlot(slot + 1),
        };
        self.remaining = self.remaining.saturating_sub(1);
        Some(node)
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.remaining
    }
}

macro_rules! table_iter {
    ($(#[$meta:meta])* $name:ident, $item:ty, |$node:ident| $extract:expr) => {
        $(#[$meta])*
        pub struct $name<'a, K, V> {
            raw: RawIter<'a, K, V>,
        }

        impl<'a, K, V> $name<'a, K, V> {
            pub(crate) fn new(raw: RawIter<'a, K, V>) -> Self {
                Self { raw }
            }

            /// True if another item is available.
            pub fn has_next(&mut self) -> bool {
                self.raw.has_next()
            }

            /// Like `Iterator::next`, but running out is an error.
            pub fn try_next(&mut self) -> Result<$item, TableError> {
                match self.raw.next_node() {
                    Some($node) => Ok($extract),
                    None => Err(TableError::ExhaustedIterator(stringify!($name))),
                }
            }

            /// Drains the iterator, passing each item with its ordinal.
            pub fn each<F>(self, mut visit: F)
            where
                F: FnMut($item, usize),
            {
                for (i, item) in self.enumerate() {
                    visit(item, i);
                }
            }
        }

        impl<'a, K, V> Iterator for $name<'a, K, V> {
            type Item = $item;

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.raw.next_node().map(|$node| $extract)
            }

            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                let n = self.raw.remaining();
                (n, Some(n))
            }
        }

        impl<'a, K, V> ExactSizeIterator for $name<'a, K, V> {}
        impl<'a, K, V> FusedIterator for $name<'a, K, V> {}
    };
}

table_iter!(
    /// Iterator over the keys of a `HashTable`.
    Keys, &'a K, |node| &node.key
);
table_iter!(
    /// Iterator over the values of a `HashTable`.
    Values, &'a V, |node| &node.value
);
table_iter!(
    /// Iterator over the `(key, value)` pairs of a `HashTable`.
    Entries, (&'a K, &'a V), |node| (&node.key, &node.value)
);
