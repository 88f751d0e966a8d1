//! Validation and debugging utilities for RBTree.
//!
//! This module contains invariant checking and the structural measurements
//! used by tests: colour rules, black height, parent links, key order and
//! arena/tree consistency.

use std::cmp::Ordering;

use crate::error::{RBTreeError, RBTreeResult, TreeResult};
use crate::types::{Color, NodeId, RBTree, NIL};

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K, V> RBTree<K, V> {
    /// Check if the tree maintains red-black tree invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// # Errors
    ///
    /// `CorruptedTree` naming the first violated rule.
    pub fn check_invariants_detailed(&self) -> RBTreeResult<()> {
        if self.root != NIL {
            if self.is_red(self.root) {
                return Err(RBTreeError::corrupted_tree("colour", "root is red"));
            }
            if self.parent(self.root) != NIL {
                return Err(RBTreeError::corrupted_tree("link", "root has a parent"));
            }
        }

        let (nodes, _) = self.check_subtree(self.root)?;
        self.check_order()?;
        self.check_counts(nodes)
    }

    /// Number of black nodes on the path from the root to the leftmost
    /// sentinel, the sentinel itself not counted.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut id = self.root;
        while id != NIL {
            if self.is_black(id) {
                height += 1;
            }
            id = self.left(id);
        }
        height
    }

    /// Depth of the deepest node, 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, id: NodeId) -> usize {
        if id == NIL {
            return 0;
        }
        1 + self
            .subtree_height(self.left(id))
            .max(self.subtree_height(self.right(id)))
    }

    /// Returns (node count, black height) of the subtree at `id`.
    fn check_subtree(&self, id: NodeId) -> TreeResult<(usize, usize)> {
        if id == NIL {
            return Ok((0, 0));
        }
        if !self.arena.contains(id) {
            return Err(RBTreeError::corrupted_tree(
                "link",
                &format!("node {} is linked but not allocated", id),
            ));
        }

        let (left, right) = (self.left(id), self.right(id));
        for child in [left, right] {
            if child == NIL {
                continue;
            }
            if self.arena.get(child).map(|node| node.parent) != Some(id) {
                return Err(RBTreeError::corrupted_tree(
                    "link",
                    &format!("child {} does not point back to parent {}", child, id),
                ));
            }
            if self.is_red(id) && self.is_red(child) {
                return Err(RBTreeError::corrupted_tree(
                    "colour",
                    &format!("red node {} has red child {}", id, child),
                ));
            }
        }

        let (left_nodes, left_black) = self.check_subtree(left)?;
        let (right_nodes, right_black) = self.check_subtree(right)?;
        if left_black != right_black {
            return Err(RBTreeError::corrupted_tree(
                "black height",
                &format!(
                    "node {} has black height {} on the left and {} on the right",
                    id, left_black, right_black
                ),
            ));
        }

        let own = usize::from(self.color(id) == Color::Black);
        Ok((left_nodes + right_nodes + 1, left_black + own))
    }

    fn check_order(&self) -> TreeResult<()> {
        let mut prev = self.first_id();
        if prev == NIL {
            return Ok(());
        }
        let mut current = self.next_id(prev);
        while current != NIL {
            match self.compare_keys(&self.arena[prev].key, &self.arena[current].key) {
                Ordering::Greater => {
                    return Err(RBTreeError::corrupted_tree(
                        "order",
                        &format!("node {} sorts after its successor {}", prev, current),
                    ));
                }
                Ordering::Equal if !self.allow_duplicates => {
                    return Err(RBTreeError::corrupted_tree(
                        "order",
                        &format!("nodes {} and {} hold equal keys", prev, current),
                    ));
                }
                _ => {}
            }
            prev = current;
            current = self.next_id(current);
        }
        Ok(())
    }

    /// Check that the size counter and the arena agree with the linked nodes.
    fn check_counts(&self, linked: usize) -> TreeResult<()> {
        if linked != self.len {
            return Err(RBTreeError::corrupted_tree(
                "size",
                &format!("{} nodes linked but len is {}", linked, self.len),
            ));
        }
        if linked != self.arena.len() {
            return Err(RBTreeError::corrupted_tree(
                "arena",
                &format!("{} nodes linked vs {} allocated", linked, self.arena.len()),
            ));
        }
        Ok(())
    }
}
