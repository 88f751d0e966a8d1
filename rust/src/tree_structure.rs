//! Tree structure management for RBTree.
//!
//! Link accessors, colouring and rotations. Every accessor treats `NIL` as
//! the black sentinel: reading its colour is allowed, painting or relinking
//! it is silently skipped so the sentinel is never mutated.

use crate::arena::ArenaStats;
use crate::types::{Color, NodeId, RBTree, NIL};

impl<K, V> RBTree<K, V> {
    // ============================================================================
    // SIZE
    // ============================================================================

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry. Ordering, duplicate mode and default survive.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// Returns true if equal keys may coexist.
    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Slot usage of the node arena.
    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    // ============================================================================
    // LINKS
    // ============================================================================

    #[inline]
    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.arena[id].left
    }

    #[inline]
    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.arena[id].right
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        self.arena[id].parent
    }

    #[inline]
    pub(crate) fn set_left(&mut self, id: NodeId, child: NodeId) {
        self.arena[id].left = child;
    }

    #[inline]
    pub(crate) fn set_right(&mut self, id: NodeId, child: NodeId) {
        self.arena[id].right = child;
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if id != NIL {
            self.arena[id].parent = parent;
        }
    }

    /// Point whatever referenced `old` from `parent` (or the root slot) at `new`.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent == NIL {
            self.root = new;
        } else if self.left(parent) == old {
            self.set_left(parent, new);
        } else {
            self.set_right(parent, new);
        }
    }

    // ============================================================================
    // COLOUR
    // ============================================================================

    #[inline]
    pub(crate) fn color(&self, id: NodeId) -> Color {
        if id == NIL {
            Color::Black
        } else {
            self.arena[id].color
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, id: NodeId) -> bool {
        self.color(id) == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self, id: NodeId) -> bool {
        self.color(id) == Color::Black
    }

    #[inline]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        if id != NIL {
            self.arena[id].color = color;
        }
    }

    /// Colour of a live node, `None` for `NIL` or a stale id.
    pub fn node_color(&self, id: NodeId) -> Option<Color> {
        self.arena.get(id).map(|node| node.color)
    }

    // ============================================================================
    // ROTATIONS
    // ============================================================================

    rotation!(
        /// Lift `x.right` into `x`'s place; `x` becomes its left child.
        rotate_left,
        left,
        right
    );

    rotation!(
        /// Lift `x.left` into `x`'s place; `x` becomes its right child.
        rotate_right,
        right,
        left
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(tree: &RBTree<i32, ()>, id: NodeId) -> String {
        if id == NIL {
            return ".".to_string();
        }
        format!(
            "({} {} {})",
            shape(tree, tree.left(id)),
            tree.arena[id].key,
            shape(tree, tree.right(id))
        )
    }

    #[test]
    fn test_rotations_preserve_order() {
        let mut tree = RBTree::new();
        for k in [2, 1, 3] {
            tree.insert(k, ());
        }
        assert_eq!(shape(&tree, tree.root), "((. 1 .) 2 (. 3 .))");

        let root = tree.root;
        tree.rotate_left(root);
        assert_eq!(shape(&tree, tree.root), "(((. 1 .) 2 .) 3 .)");
        assert_eq!(tree.parent(tree.root), NIL);

        let root = tree.root;
        tree.rotate_right(root);
        assert_eq!(shape(&tree, tree.root), "((. 1 .) 2 (. 3 .))");
        let root = tree.root;
        assert_eq!(tree.parent(tree.left(root)), root);
        assert_eq!(tree.parent(tree.right(root)), root);
    }

    #[test]
    fn test_sentinel_is_never_painted() {
        let mut tree: RBTree<i32, ()> = RBTree::new();
        tree.set_color(NIL, Color::Red);
        tree.set_parent(NIL, 0);
        assert!(tree.is_black(NIL));
        assert_eq!(tree.node_color(NIL), None);
    }

    #[test]
    fn test_clear_keeps_configuration() {
        let mut tree = RBTree::multi();
        tree.set_default(0);
        tree.insert(1, 1);
        tree.insert(1, 2);
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.allows_duplicates());
        assert_eq!(tree.default_value(), Some(&0));
        assert_eq!(tree.arena_stats().allocated_count, 0);
    }
}
