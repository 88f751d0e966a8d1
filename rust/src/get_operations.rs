//! GET operations for RBTree.
//!
//! Plain lookups never consult the default; see `default_value.rs` for the
//! default-aware variants. In a multi tree every lookup resolves to the
//! first entry, in order, among those with an equal key.

use std::cmp::Ordering;

use crate::types::{NodeId, RBTree, NIL};

impl<K, V> RBTree<K, V> {
    /// Node holding `key`, the leftmost such node in a multi tree.
    pub(crate) fn find_node(&self, key: &K) -> Option<NodeId> {
        if self.allow_duplicates {
            let id = self.lower_bound_node(key)?;
            return match self.compare_keys(key, &self.arena[id].key) {
                Ordering::Equal => Some(id),
                _ => None,
            };
        }

        let mut current = self.root;
        while current != NIL {
            let node = &self.arena[current];
            match self.compare_keys(key, &node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(current),
            }
        }
        None
    }

    /// Get a reference to the value associated with a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_node(key).map(|id| &self.arena[id].value)
    }

    /// Get a mutable reference to the value for a key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find_node(key)?;
        Some(&mut self.arena[id].value)
    }

    /// The stored key equal to `key`, together with its value.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find_node(key).and_then(|id| self.entry(id))
    }

    /// Check if key exists in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// Number of entries whose key equals `key`.
    pub fn count(&self, key: &K) -> usize {
        let Some(mut id) = self.find_node(key) else {
            return 0;
        };
        let mut count = 0;
        while id != NIL && self.compare_keys(key, &self.arena[id].key) == Ordering::Equal {
            count += 1;
            id = self.next_id(id);
        }
        count
    }

    /// First key, in order, whose value equals `value`. Linear scan.
    pub fn key_for_value(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.iter().find(|(_, v)| *v == value).map(|(k, _)| k)
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.key_for_value(value).is_some()
    }
}
