//! DELETE operations for RBTree.
//!
//! A node with two children is not unlinked itself: its in-order successor
//! is spliced out instead and the successor's entry is moved into the
//! node's slot. Callers holding a `NodeId` across a deletion must expect it
//! to name a different entry afterwards.

use std::cmp::Ordering;

use log::trace;

use crate::error::{ModifyResult, RBTreeError};
use crate::types::{Color, NodeId, RBTree, NIL};

impl<K, V> RBTree<K, V> {
    /// Remove the entry for `key` and return its value.
    ///
    /// In a multi tree this removes the first equal entry in order, the same
    /// one [`get`](Self::get) returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let mut tree = RBTree::multi();
    /// tree.insert(1, "a");
    /// tree.insert(1, "b");
    /// assert_eq!(tree.delete(&1), Some("a"));
    /// assert_eq!(tree.delete(&1), Some("b"));
    /// assert_eq!(tree.delete(&1), None);
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<V> {
        self.delete_entry(key).map(|(_, value)| value)
    }

    /// Remove the entry for `key`, returning the stored key too.
    pub fn delete_entry(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.find_node(key)?;
        Some(self.remove_node(id))
    }

    /// Remove every entry whose key equals `key`, returning their values in
    /// order.
    pub fn delete_all(&mut self, key: &K) -> Vec<V> {
        let mut removed = Vec::new();
        while let Some(id) = self.find_node(key) {
            removed.push(self.remove_node(id).1);
        }
        removed
    }

    /// Remove the entry held by a specific node.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `id` is `NIL` or no longer names a live node.
    pub fn delete_node(&mut self, id: NodeId) -> ModifyResult<(K, V)> {
        if !self.arena.contains(id) {
            return Err(RBTreeError::invalid_argument(
                "node",
                &format!("{} is not a live node", id),
            ));
        }
        Ok(self.remove_node(id))
    }

    /// Remove and return the first entry.
    pub fn shift(&mut self) -> Option<(K, V)> {
        let id = self.minimum()?;
        Some(self.remove_node(id))
    }

    /// Remove and return the last entry.
    pub fn pop(&mut self) -> Option<(K, V)> {
        let id = self.maximum()?;
        Some(self.remove_node(id))
    }

    /// Unlink `z`'s entry and free one node.
    pub(crate) fn remove_node(&mut self, z: NodeId) -> (K, V) {
        let y = if self.left(z) == NIL || self.right(z) == NIL {
            z
        } else {
            self.subtree_minimum(self.right(z))
        };
        let x = if self.left(y) != NIL {
            self.left(y)
        } else {
            self.right(y)
        };

        // x may be the sentinel, which has no parent of its own.
        let x_parent = self.parent(y);
        self.set_parent(x, x_parent);
        self.replace_child(x_parent, y, x);

        if y != z {
            trace!("node {} takes the entry of its successor {}", z, y);
            let (target, successor) = self.arena.pair_mut(z, y);
            std::mem::swap(&mut target.key, &mut successor.key);
            std::mem::swap(&mut target.value, &mut successor.value);
        }

        if self.color(y) == Color::Black {
            self.delete_fixup(x, x_parent);
        }
        self.len -= 1;

        let node = self.arena.take(y);
        (node.key, node.value)
    }

    /// Restore the red-black properties after removing a black node from
    /// `x`'s position under `parent`.
    fn delete_fixup(&mut self, mut x: NodeId, mut parent: NodeId) {
        while x != self.root && self.is_black(x) {
            if x == self.left(parent) {
                let mut w = self.right(parent);
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    w = self.right(parent);
                }
                if self.is_black(self.left(w)) && self.is_black(self.right(w)) {
                    self.set_color(w, Color::Red);
                    x = parent;
                    parent = self.parent(x);
                } else {
                    if self.is_black(self.right(w)) {
                        let inner = self.left(w);
                        self.set_color(inner, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(parent);
                    }
                    let parent_color = self.color(parent);
                    self.set_color(w, parent_color);
                    self.set_color(parent, Color::Black);
                    let outer = self.right(w);
                    self.set_color(outer, Color::Black);
                    self.rotate_left(parent);
                    x = self.root;
                    parent = NIL;
                }
            } else {
                let mut w = self.left(parent);
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    w = self.left(parent);
                }
                if self.is_black(self.right(w)) && self.is_black(self.left(w)) {
                    self.set_color(w, Color::Red);
                    x = parent;
                    parent = self.parent(x);
                } else {
                    if self.is_black(self.left(w)) {
                        let inner = self.right(w);
                        self.set_color(inner, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(parent);
                    }
                    let parent_color = self.color(parent);
                    self.set_color(w, parent_color);
                    self.set_color(parent, Color::Black);
                    let outer = self.left(w);
                    self.set_color(outer, Color::Black);
                    self.rotate_right(parent);
                    x = self.root;
                    parent = NIL;
                }
            }
        }
        self.set_color(x, Color::Black);
    }

    /// Remove deferred nodes, highest in-order position first. Removing the
    /// highest remaining node only ever relocates a larger entry, so the
    /// remaining ids stay valid.
    pub(crate) fn apply_deferred(&mut self, mut doomed: Vec<NodeId>, ascending: bool) {
        if doomed.is_empty() {
            return;
        }
        trace!("applying {} deferred deletions", doomed.len());
        if !ascending {
            doomed.reverse();
        }
        while let Some(id) = doomed.pop() {
            self.remove_node(id);
        }
    }

    /// Remove entries for which `predicate` returns true; returns how many.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let mut tree: RBTree<i32, i32> = (0..10).map(|i| (i, i)).collect();
    /// assert_eq!(tree.delete_if(|k, _| k % 2 == 0), 5);
    /// let keys: Vec<_> = tree.keys().copied().collect();
    /// assert_eq!(keys, [1, 3, 5, 7, 9]);
    /// ```
    pub fn delete_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let doomed: Vec<NodeId> = {
            let _guard = self.enter_iteration();
            let mut doomed = Vec::new();
            let mut id = self.first_id();
            while id != NIL {
                let node = &self.arena[id];
                if predicate(&node.key, &node.value) {
                    doomed.push(id);
                }
                id = self.next_id(id);
            }
            doomed
        };
        let removed = doomed.len();
        self.apply_deferred(doomed, true);
        removed
    }

    /// Keep only entries for which `predicate` returns true.
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.delete_if(|k, v| !predicate(k, v));
    }

    /// Remove the entries [`bound`](Self::bound) would return.
    pub fn delete_bound(&mut self, low: &K, high: Option<&K>) -> usize {
        let high = high.unwrap_or(low);
        let mut doomed = Vec::new();
        let mut id = match self.lower_bound_node(low) {
            Some(id) => id,
            None => return 0,
        };
        while id != NIL {
            if self.compare_keys(&self.arena[id].key, high) == Ordering::Greater {
                break;
            }
            doomed.push(id);
            id = self.next_id(id);
        }
        let removed = doomed.len();
        self.apply_deferred(doomed, true);
        removed
    }
}
