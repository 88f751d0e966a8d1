//! Iteration and traversal for RBTree.
//!
//! Every traversal runs under an iteration guard: a reentrant counter on
//! the tree that is raised when the traversal starts and lowered when it
//! ends, however it ends. While the counter is raised the tree refuses to
//! grow (see [`Visit::insert`]) and deletions requested by the visitor are
//! deferred until the outermost mutable traversal finishes.

use std::cell::Cell;
use std::iter::FusedIterator;

use crate::error::ModifyResult;
use crate::types::{Node, NodeId, RBTree, NIL};

// ============================================================================
// ITERATION GUARD
// ============================================================================

/// Raises the traversal counter for its lifetime.
pub(crate) struct IterationGuard<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> IterationGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self { depth }
    }
}

impl Drop for IterationGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

/// Guard for traversals that hold the tree mutably.
struct MutIterationScope<'a, K, V> {
    tree: &'a mut RBTree<K, V>,
}

impl<'a, K, V> MutIterationScope<'a, K, V> {
    fn enter(tree: &'a mut RBTree<K, V>) -> Self {
        tree.iterating.set(tree.iterating.get() + 1);
        Self { tree }
    }
}

impl<K, V> Drop for MutIterationScope<'_, K, V> {
    fn drop(&mut self) {
        self.tree.iterating.set(self.tree.iterating.get() - 1);
    }
}

// ============================================================================
// NAVIGATION
// ============================================================================

impl<K, V> RBTree<K, V> {
    pub(crate) fn enter_iteration(&self) -> IterationGuard<'_> {
        IterationGuard::enter(&self.iterating)
    }

    /// True while any traversal of this tree is in progress.
    pub fn is_iterating(&self) -> bool {
        self.iterating.get() > 0
    }

    pub(crate) fn subtree_minimum(&self, mut id: NodeId) -> NodeId {
        while self.left(id) != NIL {
            id = self.left(id);
        }
        id
    }

    pub(crate) fn subtree_maximum(&self, mut id: NodeId) -> NodeId {
        while self.right(id) != NIL {
            id = self.right(id);
        }
        id
    }

    pub(crate) fn first_id(&self) -> NodeId {
        if self.root == NIL {
            NIL
        } else {
            self.subtree_minimum(self.root)
        }
    }

    pub(crate) fn last_id(&self) -> NodeId {
        if self.root == NIL {
            NIL
        } else {
            self.subtree_maximum(self.root)
        }
    }

    pub(crate) fn next_id(&self, id: NodeId) -> NodeId {
        if self.right(id) != NIL {
            return self.subtree_minimum(self.right(id));
        }
        let mut child = id;
        let mut parent = self.parent(id);
        while parent != NIL && child == self.right(parent) {
            child = parent;
            parent = self.parent(parent);
        }
        parent
    }

    pub(crate) fn prev_id(&self, id: NodeId) -> NodeId {
        if self.left(id) != NIL {
            return self.subtree_maximum(self.left(id));
        }
        let mut child = id;
        let mut parent = self.parent(id);
        while parent != NIL && child == self.left(parent) {
            child = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// Node holding the first entry.
    pub fn minimum(&self) -> Option<NodeId> {
        Some(self.first_id()).filter(|&id| id != NIL)
    }

    /// Node holding the last entry.
    pub fn maximum(&self) -> Option<NodeId> {
        Some(self.last_id()).filter(|&id| id != NIL)
    }

    /// Node after `id` in order; `None` past the end or for a stale id.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        if !self.arena.contains(id) {
            return None;
        }
        Some(self.next_id(id)).filter(|&next| next != NIL)
    }

    /// Node before `id` in order; `None` before the start or for a stale id.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if !self.arena.contains(id) {
            return None;
        }
        Some(self.prev_id(id)).filter(|&prev| prev != NIL)
    }

    /// The entry a node currently holds.
    pub fn entry(&self, id: NodeId) -> Option<(&K, &V)> {
        self.arena.get(id).map(|node| (&node.key, &node.value))
    }

    /// Mutable access to the value a node currently holds.
    pub fn entry_value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// All live node ids in order.
    pub(crate) fn in_order_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.len);
        let mut id = self.first_id();
        while id != NIL {
            ids.push(id);
            id = self.next_id(id);
        }
        ids
    }
}

// ============================================================================
// BORROWING ITERATORS
// ============================================================================

/// In-order iterator over `(&K, &V)`.
pub struct Iter<'a, K, V> {
    tree: &'a RBTree<K, V>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
    _guard: IterationGuard<'a>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let id = self.front;
        self.front = tree.next_id(id);
        self.remaining -= 1;
        let node = &tree.arena[id];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let id = self.back;
        self.back = tree.prev_id(id);
        self.remaining -= 1;
        let node = &tree.arena[id];
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over keys in order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over values in key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// In-order iterator over `(&K, &mut V)`.
pub struct IterMut<'a, K, V> {
    inner: std::vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Iterator over mutable values in key order.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

/// Owning in-order iterator.
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> RBTree<K, V> {
    /// Returns an in-order iterator over entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let tree = RBTree::from([(2, 'b'), (1, 'a'), (3, 'c')]);
    /// let forward: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
    /// let backward: Vec<_> = tree.iter().rev().map(|(k, _)| *k).collect();
    /// assert_eq!(forward, [1, 2, 3]);
    /// assert_eq!(backward, [3, 2, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            front: self.first_id(),
            back: self.last_id(),
            remaining: self.len,
            _guard: self.enter_iteration(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// In-order iterator with mutable access to values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let order = self.in_order_ids();
        let mut slots: Vec<Option<(&K, &mut V)>> = self
            .arena
            .slots_mut()
            .into_iter()
            .map(|slot| {
                slot.map(|node| {
                    let Node { key, value, .. } = node;
                    (&*key, value)
                })
            })
            .collect();
        let entries: Vec<(&K, &mut V)> = order
            .into_iter()
            .filter_map(|id| slots[id as usize].take())
            .collect();
        IterMut {
            inner: entries.into_iter(),
        }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// All entries in order.
    pub fn to_vec(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    // ============================================================================
    // CALLBACK TRAVERSALS
    // ============================================================================

    /// Visit every entry in order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.iter() {
            f(k, v);
        }
    }

    /// Visit every entry in reverse order.
    pub fn reverse_for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.iter().rev() {
            f(k, v);
        }
    }

    /// Visit every entry in order with permission to update values, insert
    /// over existing keys and schedule deletions.
    ///
    /// Deletions requested through [`Visit::delete`] take effect once the
    /// traversal has finished. If `f` returns an error the traversal stops,
    /// pending deletions are dropped and the error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let mut tree: RBTree<i32, i32> = (1..=6).map(|i| (i, i)).collect();
    /// tree.each_mut(|visit| {
    ///     if visit.key() % 2 == 0 {
    ///         visit.delete();
    ///     } else {
    ///         *visit.value_mut() *= 10;
    ///     }
    ///     Ok(())
    /// })
    /// .unwrap();
    /// let entries: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
    /// assert_eq!(entries, [(1, 10), (3, 30), (5, 50)]);
    /// ```
    pub fn each_mut<F>(&mut self, f: F) -> ModifyResult<()>
    where
        F: FnMut(&mut Visit<'_, K, V>) -> ModifyResult<()>,
    {
        self.traverse_mut(false, f)
    }

    /// [`each_mut`](Self::each_mut) in reverse order.
    pub fn reverse_each_mut<F>(&mut self, f: F) -> ModifyResult<()>
    where
        F: FnMut(&mut Visit<'_, K, V>) -> ModifyResult<()>,
    {
        self.traverse_mut(true, f)
    }

    fn traverse_mut<F>(&mut self, reverse: bool, mut f: F) -> ModifyResult<()>
    where
        F: FnMut(&mut Visit<'_, K, V>) -> ModifyResult<()>,
    {
        let mut doomed = Vec::new();
        {
            let scope = MutIterationScope::enter(self);
            let mut id = if reverse {
                scope.tree.last_id()
            } else {
                scope.tree.first_id()
            };
            while id != NIL {
                let next = if reverse {
                    scope.tree.prev_id(id)
                } else {
                    scope.tree.next_id(id)
                };
                let mut visit = Visit {
                    tree: &mut *scope.tree,
                    node: id,
                    doomed: &mut doomed,
                };
                f(&mut visit)?;
                id = next;
            }
        }
        self.apply_deferred(doomed, !reverse);
        Ok(())
    }

    // ============================================================================
    // FILTERED COPIES
    // ============================================================================

    /// New tree with the entries for which `predicate` returns true. Keeps
    /// the duplicate mode and ordering, not the default.
    pub fn select<F>(&self, mut predicate: F) -> Self
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        let mut selected = self.empty_like();
        for (k, v) in self.iter() {
            if predicate(k, v) {
                selected.insert(k.clone(), v.clone());
            }
        }
        selected
    }

    /// Copy of the tree, default included, without the entries for which
    /// `predicate` returns true.
    pub fn reject<F>(&self, predicate: F) -> Self
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        let mut rejected = self.clone();
        rejected.delete_if(predicate);
        rejected
    }
}

// ============================================================================
// VISITOR
// ============================================================================

/// One step of a mutable traversal.
pub struct Visit<'a, K, V> {
    tree: &'a mut RBTree<K, V>,
    node: NodeId,
    doomed: &'a mut Vec<NodeId>,
}

impl<'a, K, V> Visit<'a, K, V> {
    pub fn key(&self) -> &K {
        &self.tree.arena[self.node].key
    }

    pub fn value(&self) -> &V {
        &self.tree.arena[self.node].value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.tree.arena[self.node].value
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Read-only view of the whole tree.
    pub fn tree(&self) -> &RBTree<K, V> {
        &*self.tree
    }

    /// Schedule this entry for removal once the traversal finishes.
    pub fn delete(&mut self) {
        if self.doomed.last() != Some(&self.node) {
            self.doomed.push(self.node);
        }
    }

    /// Insert while traversing.
    ///
    /// # Errors
    ///
    /// `IllegalMutation` if the insert would add a node. Replacing the value
    /// of an existing key in a unique tree is allowed.
    pub fn insert(&mut self, key: K, value: V) -> ModifyResult<Option<V>> {
        self.tree.guarded_insert(key, value)
    }
}

// ============================================================================
// INTO ITERATOR
// ============================================================================

impl<'a, K, V> IntoIterator for &'a RBTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut RBTree<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for RBTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.in_order_ids();
        let mut arena = self.arena;
        let entries: Vec<(K, V)> = order
            .into_iter()
            .map(|id| {
                let node = arena.take(id);
                (node.key, node.value)
            })
            .collect();
        IntoIter {
            inner: entries.into_iter(),
        }
    }
}
