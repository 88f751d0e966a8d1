//! Range query operations for RBTree.
//!
//! `lower_bound(k)` is the first entry whose key is not less than `k`;
//! `upper_bound(k)` is the last entry whose key is not greater than `k`.
//! With duplicate keys these land on the first and last of the equal run.

use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use crate::iteration::IterationGuard;
use crate::types::{NodeId, RBTree, NIL};

impl<K, V> RBTree<K, V> {
    // ============================================================================
    // BOUNDS
    // ============================================================================

    /// Node of the first entry with key `>= key`.
    pub fn lower_bound_node(&self, key: &K) -> Option<NodeId> {
        let mut found = NIL;
        let mut current = self.root;
        while current != NIL {
            match self.compare_keys(key, &self.arena[current].key) {
                Ordering::Greater => current = self.right(current),
                _ => {
                    found = current;
                    current = self.left(current);
                }
            }
        }
        Some(found).filter(|&id| id != NIL)
    }

    /// Node of the last entry with key `<= key`.
    pub fn upper_bound_node(&self, key: &K) -> Option<NodeId> {
        let mut found = NIL;
        let mut current = self.root;
        while current != NIL {
            match self.compare_keys(key, &self.arena[current].key) {
                Ordering::Less => current = self.left(current),
                _ => {
                    found = current;
                    current = self.right(current);
                }
            }
        }
        Some(found).filter(|&id| id != NIL)
    }

    /// First entry whose key is not less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let tree = RBTree::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(tree.lower_bound(&15), Some((&20, &"b")));
    /// assert_eq!(tree.lower_bound(&20), Some((&20, &"b")));
    /// assert_eq!(tree.lower_bound(&31), None);
    /// ```
    pub fn lower_bound(&self, key: &K) -> Option<(&K, &V)> {
        self.lower_bound_node(key).and_then(|id| self.entry(id))
    }

    /// Last entry whose key is not greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let tree = RBTree::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(tree.upper_bound(&25), Some((&20, &"b")));
    /// assert_eq!(tree.upper_bound(&9), None);
    /// ```
    pub fn upper_bound(&self, key: &K) -> Option<(&K, &V)> {
        self.upper_bound_node(key).and_then(|id| self.entry(id))
    }

    /// Entries with `low <= key <= high` in order; without `high`, the
    /// entries whose key equals `low`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let mut tree = RBTree::multi();
    /// for (k, v) in [(1, 'a'), (2, 'b'), (2, 'c'), (3, 'd')] {
    ///     tree.insert(k, v);
    /// }
    /// assert_eq!(tree.bound(&2, None), [(&2, &'b'), (&2, &'c')]);
    /// assert_eq!(tree.bound(&2, Some(&9)).len(), 3);
    /// ```
    pub fn bound(&self, low: &K, high: Option<&K>) -> Vec<(&K, &V)> {
        let mut entries = Vec::new();
        self.bound_each(low, high, |k, v| entries.push((k, v)));
        entries
    }

    /// Visit the entries [`bound`](Self::bound) would return.
    pub fn bound_each<'a, F>(&'a self, low: &K, high: Option<&K>, mut f: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        let _guard = self.enter_iteration();
        let high = high.unwrap_or(low);
        let mut id = match self.lower_bound_node(low) {
            Some(id) => id,
            None => return,
        };
        while id != NIL {
            let node = &self.arena[id];
            if self.compare_keys(&node.key, high) == Ordering::Greater {
                break;
            }
            f(&node.key, &node.value);
            id = self.next_id(id);
        }
    }

    /// First entry in order.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.minimum().and_then(|id| self.entry(id))
    }

    /// Last entry in order.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.maximum().and_then(|id| self.entry(id))
    }

    // ============================================================================
    // RANGE ITERATOR
    // ============================================================================

    /// Double-ended iterator over the entries whose keys fall in `range`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let tree: RBTree<i32, i32> = (0..10).map(|i| (i, i)).collect();
    /// let keys: Vec<_> = tree.range(3..6).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [3, 4, 5]);
    /// let keys: Vec<_> = tree.range(7..).rev().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [9, 8, 7]);
    /// ```
    pub fn range<R>(&self, range: R) -> Range<'_, K, V>
    where
        R: RangeBounds<K>,
    {
        let front = match range.start_bound() {
            Bound::Included(key) => self.lower_bound_node(key).unwrap_or(NIL),
            Bound::Excluded(key) => match self.upper_bound_node(key) {
                Some(id) => self.next_id(id),
                None => self.first_id(),
            },
            Bound::Unbounded => self.first_id(),
        };
        let back = match range.end_bound() {
            Bound::Included(key) => self.upper_bound_node(key).unwrap_or(NIL),
            Bound::Excluded(key) => match self.lower_bound_node(key) {
                Some(id) => self.prev_id(id),
                None => self.last_id(),
            },
            Bound::Unbounded => self.last_id(),
        };

        let empty = front == NIL
            || back == NIL
            || self.compare_keys(&self.arena[front].key, &self.arena[back].key)
                == Ordering::Greater
            || (front != back && self.next_id(back) == front);

        Range {
            tree: self,
            front,
            back,
            done: empty,
            _guard: self.enter_iteration(),
        }
    }
}

/// Iterator returned by [`RBTree::range`].
pub struct Range<'a, K, V> {
    tree: &'a RBTree<K, V>,
    front: NodeId,
    back: NodeId,
    done: bool,
    _guard: IterationGuard<'a>,
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let tree = self.tree;
        let id = self.front;
        if id == self.back {
            self.done = true;
        } else {
            self.front = tree.next_id(id);
        }
        tree.entry(id)
    }
}

impl<'a, K, V> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let tree = self.tree;
        let id = self.back;
        if id == self.front {
            self.done = true;
        } else {
            self.back = tree.prev_id(id);
        }
        tree.entry(id)
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}
