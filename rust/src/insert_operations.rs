//! INSERT operations for RBTree.
//!
//! Insertion descends by the active ordering, links a red leaf and repairs
//! colours bottom-up. Keys comparing equal to an existing key descend to
//! the right, so equal keys in a multi tree keep their insertion order.

use std::cmp::Ordering;

use crate::error::{ModifyResult, RBTreeError};
use crate::types::{Color, Node, NodeId, RBTree, NIL};

/// Outcome of linking a detached node into the tree.
pub(crate) enum Attach {
    Linked,
    /// An equal key is already linked and merging was requested.
    Existing(NodeId),
}

impl<K, V> RBTree<K, V> {
    /// Insert an entry.
    ///
    /// A unique tree replaces the value of an equal key and returns the old
    /// value, keeping the stored key. A multi tree always adds a new entry and
    /// returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert_eq!(tree.insert(1, "a"), None);
    /// assert_eq!(tree.insert(1, "b"), Some("a"));
    /// assert_eq!(tree.get(&1), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if !self.allow_duplicates {
            if let Some(id) = self.find_node(&key) {
                return Some(std::mem::replace(&mut self.arena[id].value, value));
            }
        }
        self.insert_new(key, value);
        None
    }

    /// Insert through the traversal guard: overwriting is always allowed,
    /// growing the tree is not while a traversal is active.
    pub(crate) fn guarded_insert(&mut self, key: K, value: V) -> ModifyResult<Option<V>> {
        if !self.is_iterating() {
            return Ok(self.insert(key, value));
        }
        if !self.allow_duplicates {
            if let Some(id) = self.find_node(&key) {
                return Ok(Some(std::mem::replace(&mut self.arena[id].value, value)));
            }
        }
        Err(RBTreeError::illegal_mutation("add a new key into RBTree"))
    }

    /// Allocate and link a new node, returning its id. Nothing is allocated
    /// until the descent has finished.
    pub(crate) fn insert_new(&mut self, key: K, value: V) -> NodeId {
        let (parent, go_left) = self.leaf_position(&key);
        let z = self.arena.allocate(Node::new(key, value));
        self.link_leaf(z, parent, go_left);
        self.len += 1;
        self.insert_fixup(z);
        z
    }

    /// Link the detached red node `z` as a leaf. With `merge_equal`, stop at
    /// an equal key instead and report it.
    pub(crate) fn attach(&mut self, z: NodeId, merge_equal: bool) -> Attach {
        let key = &self.arena[z].key;
        if merge_equal {
            if let Some(existing) = self.find_node(key) {
                return Attach::Existing(existing);
            }
        }
        let (parent, go_left) = self.leaf_position(key);
        self.link_leaf(z, parent, go_left);
        Attach::Linked
    }

    /// Parent of the leaf slot where `key` belongs, and whether that slot is
    /// its left child. Equal keys descend to the right.
    fn leaf_position(&self, key: &K) -> (NodeId, bool) {
        let mut parent = NIL;
        let mut current = self.root;
        let mut go_left = false;

        while current != NIL {
            parent = current;
            go_left = self.compare_keys(key, &self.arena[current].key) == Ordering::Less;
            current = if go_left {
                self.left(current)
            } else {
                self.right(current)
            };
        }
        (parent, go_left)
    }

    fn link_leaf(&mut self, z: NodeId, parent: NodeId, go_left: bool) {
        self.set_parent(z, parent);
        if parent == NIL {
            self.root = z;
        } else if go_left {
            self.set_left(parent, z);
        } else {
            self.set_right(parent, z);
        }
    }

    /// Restore the red-black properties after linking the red node `z`.
    pub(crate) fn insert_fixup(&mut self, mut z: NodeId) {
        while self.is_red(self.parent(z)) {
            let parent = self.parent(z);
            // A red parent is never the root, so the grandparent exists.
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.right(parent) {
                        z = parent;
                        self.rotate_left(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.left(parent) {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }
}
