//! Core types and data structures for RBTree.
//!
//! This module contains the tree and node definitions shared by every
//! operation module.

use std::cell::Cell;

use crate::arena::NodeArena;
pub use crate::arena::{NodeId, NIL};
use crate::default_value::DefaultValue;
use crate::ordering::ActiveOrder;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Red-black tree map with optional duplicate keys.
///
/// Entries are kept sorted by key under the tree's ordering: the key's
/// natural `Ord` unless a custom [`KeyOrder`](crate::KeyOrder) is installed.
/// A tree built with [`RBTree::new`] holds each key at most once; one built
/// with [`RBTree::multi`] keeps every inserted entry, equal keys in
/// insertion order.
///
/// # Examples
///
/// ```
/// use rbtree::RBTree;
///
/// let mut tree = RBTree::new();
/// tree.insert(5, "e");
/// tree.insert(3, "c");
/// tree.insert(8, "h");
/// tree.insert(1, "a");
///
/// assert_eq!(tree.get(&3), Some(&"c"));
/// assert_eq!(tree.lower_bound(&4), Some((&5, &"e")));
///
/// tree.delete(&3);
/// let keys: Vec<_> = tree.keys().copied().collect();
/// assert_eq!(keys, [1, 5, 8]);
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion / deletion / lookup / bounds**: O(log n)
/// - **Successor / predecessor**: O(1) amortized during a full walk
/// - **Iteration, `bound`, serialization**: O(n)
/// - **Ordering replacement**: O(n log n) rebuild
pub struct RBTree<K, V> {
    /// Node storage; links are ids into this arena.
    pub(crate) arena: NodeArena<Node<K, V>>,
    /// Root node, `NIL` when empty.
    pub(crate) root: NodeId,
    /// Number of entries.
    pub(crate) len: usize,
    /// Ordering consulted for every structural decision.
    pub(crate) order: ActiveOrder<K>,
    /// Fixed at construction.
    pub(crate) allow_duplicates: bool,
    /// Consulted only on lookup misses.
    pub(crate) default: DefaultValue<K, V>,
    /// Reentrant traversal counter.
    pub(crate) iterating: Cell<usize>,
}

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// A tree node. Child links own their subtree; `parent` is a back-reference
/// used only for upward walks.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
}

impl<K, V> Node<K, V> {
    /// New nodes start red with sentinel links.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }
}
