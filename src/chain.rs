//! Collision chain: the singly linked list of entries behind one slot.
//!
//! A chain never owns the equality it searches with; the table passes its
//! `KeyEquals` into every lookup. New entries go to the front, so insertion
//! is O(1) and lookups are a linear scan.

use crate::policy::KeyEquals;

#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    next: Option<Box<Node<K, V>>>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            next: None,
        })
    }

    #[inline]
    pub(crate) fn next(&self) -> Option<&Node<K, V>> {
        self.next.as_deref()
    }
}

#[derive(Debug)]
pub(crate) struct Chain<K, V> {
    head: Option<Box<Node<K, V>>>,
}

impl<K, V> Chain<K, V> {
    pub(crate) fn new() -> Self {
        Chain { head: None }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    pub(crate) fn head(&self) -> Option<&Node<K, V>> {
        self.head.as_deref()
    }

    /// Links `node` in as the new head. The node keeps its allocation, which
    /// is what lets resize move entries instead of rebuilding them.
    pub(crate) fn insert_front(&mut self, mut node: Box<Node<K, V>>) {
        node.next = self.head.take();
        self.head = Some(node);
    }

    /// Unlinks and returns the head node.
    pub(crate) fn pop_front(&mut self) -> Option<Box<Node<K, V>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        Some(node)
    }

    pub(crate) fn find<E>(&self, equals: &E, key: &K) -> Option<&Node<K, V>>
    where
        E: KeyEquals<K> + ?Sized,
    {
        self.iter().find(|node| equals.equals(key, &node.key))
    }

    pub(crate) fn find_mut<E>(&mut self, equals: &E, key: &K) -> Option<&mut Node<K, V>>
    where
        E: KeyEquals<K> + ?Sized,
    {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            if equals.equals(key, &node.key) {
                return Some(node);
            }
            cur = node.next.as_deref_mut();
        }
        None
    }

    /// Overwrites the value of an equal key in place, or prepends a new
    /// entry. Returns true iff the key was not already present.
    pub(crate) fn put<E>(&mut self, equals: &E, key: K, value: V) -> bool
    where
        E: KeyEquals<K> + ?Sized,
    {
        if let Some(node) = self.find_mut(equals, &key) {
            node.value = value;
            return false;
        }
        self.insert_front(Node::new(key, value));
        true
    }

    /// Unlinks the first entry whose key is equal to `key`.
    pub(crate) fn remove<E>(&mut self, equals: &E, key: &K) -> Option<(K, V)>
    where
        E: KeyEquals<K> + ?Sized,
    {
        let mut cur = &mut self.head;
        while cur
            .as_ref()
            .is_some_and(|node| !equals.equals(key, &node.key))
        {
            if let Some(node) = cur {
                cur = &mut node.next;
            }
        }
        let mut node = cur.take()?;
        *cur = node.next.take();
        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    pub(crate) fn iter(&self) -> ChainIter<'_, K, V> {
        ChainIter {
            node: self.head.as_deref(),
        }
    }
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Unlink iteratively; the default recursive drop of a long chain (say, under
// a constant hash) would overflow the stack.
impl<K, V> Drop for Chain<K, V> {
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}

/// Forward-only cursor over one chain.
pub(crate) struct ChainIter<'a, K, V> {
    node: Option<&'a Node<K, V>>,
}

impl<'a, K, V> ChainIter<'a, K, V> {
    #[inline]
    pub(crate) fn has_next(&self) -> bool {
        self.node.is_some()
    }
}

impl<'a, K, V> Iterator for ChainIter<'a, K, V> {
    type Item = &'a Node<K, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.next();
        Some(node)
    }
}
