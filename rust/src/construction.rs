//! Construction and initialization logic for RBTree.

use std::cell::Cell;

use crate::arena::NodeArena;
use crate::default_value::DefaultValue;
use crate::ordering::{ActiveOrder, KeyOrder};
use crate::types::{RBTree, NIL};

impl<K, V> RBTree<K, V> {
    fn assemble(order: ActiveOrder<K>, allow_duplicates: bool, capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            root: NIL,
            len: 0,
            order,
            allow_duplicates,
            default: DefaultValue::None,
            iterating: Cell::new(0),
        }
    }

    /// Create an empty unique-key tree using the keys' natural order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert_eq!(tree.insert("k", 1), None);
    /// assert_eq!(tree.insert("k", 2), Some(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn new() -> Self
    where
        K: Ord,
    {
        Self::assemble(ActiveOrder::natural(), false, 0)
    }

    /// Create an empty tree that keeps every inserted entry, equal keys in
    /// insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let mut tree = RBTree::multi();
    /// tree.insert("k", 1);
    /// tree.insert("k", 2);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.get(&"k"), Some(&1));
    /// ```
    pub fn multi() -> Self
    where
        K: Ord,
    {
        Self::assemble(ActiveOrder::natural(), true, 0)
    }

    /// Unique-key tree with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self
    where
        K: Ord,
    {
        Self::assemble(ActiveOrder::natural(), false, capacity)
    }

    /// Unique-key tree ordered by `order`.
    pub fn with_ordering(order: KeyOrder<K>) -> Self {
        Self::assemble(ActiveOrder::Custom(order), false, 0)
    }

    /// Duplicate-allowing tree ordered by `order`.
    pub fn multi_with_ordering(order: KeyOrder<K>) -> Self {
        Self::assemble(ActiveOrder::Custom(order), true, 0)
    }

    /// Empty tree with this tree's mode and ordering, but no default.
    pub(crate) fn empty_like(&self) -> Self {
        Self::assemble(self.order.clone(), self.allow_duplicates, 0)
    }

    /// Builder form of [`set_default`](Self::set_default).
    pub fn with_default(mut self, value: V) -> Self {
        self.set_default(value);
        self
    }
}

impl<K: Ord, V> Default for RBTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones share the ordering by identity, so a clone compares equal to its
/// source.
impl<K: Clone, V: Clone> Clone for RBTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
            len: self.len,
            order: self.order.clone(),
            allow_duplicates: self.allow_duplicates,
            default: self.default.clone(),
            iterating: Cell::new(0),
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RBTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = RBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V> Extend<(K, V)> for RBTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTree<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_is_empty() {
        let tree: RBTree<i32, String> = RBTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(!tree.allows_duplicates());
        assert!(!tree.has_custom_ordering());
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_with_capacity_preallocates() {
        let tree: RBTree<i32, i32> = RBTree::with_capacity(64);
        assert!(tree.arena_stats().total_capacity >= 64);
        assert_eq!(tree.arena_stats().allocated_count, 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut tree = RBTree::from([(1, "a"), (2, "b")]);
        let copy = tree.clone();
        tree.insert(3, "c");
        assert_eq!(copy.len(), 2);
        assert_eq!(tree.len(), 3);
        assert!(copy.check_invariants());
    }

    #[test]
    fn test_from_iter_overwrites_duplicates() {
        let tree: RBTree<_, _> = vec![(1, 'a'), (1, 'b'), (0, 'z')].into_iter().collect();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(&1), Some(&'b'));
    }

    #[test]
    fn test_extend_multi_keeps_all() {
        let mut tree = RBTree::multi();
        tree.extend(vec![(1, 'a'), (1, 'b')]);
        tree.extend(vec![(1, 'c')]);
        let values: Vec<char> = tree.values().copied().collect();
        assert_eq!(values, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_with_default_builder() {
        let tree: RBTree<i32, i32> = RBTree::new().with_default(7);
        assert_eq!(tree.lookup(&1).as_deref(), Some(&7));
    }
}
