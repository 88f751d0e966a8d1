//! Key ordering for RBTree.
//!
//! The tree compares keys with their natural `Ord` unless a [`KeyOrder`] is
//! installed. Replacing the ordering rebuilds the whole tree; the rebuild is
//! all-or-nothing: if the new comparator panics or turns out not to be a
//! total order, the previous ordering and shape are restored before the
//! failure reaches the caller.

use std::cmp::Ordering;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use compare::Compare;
use log::{debug, warn};

use crate::error::{ModifyResult, RBTreeError, TreeResult};
use crate::insert_operations::Attach;
use crate::types::{Color, NodeId, RBTree, NIL};

/// Object-safe view of a `Compare<K>` implementation.
trait KeyCompare<K> {
    fn compare_keys(&self, a: &K, b: &K) -> Ordering;
}

impl<K, C: Compare<K>> KeyCompare<K> for C {
    #[inline]
    fn compare_keys(&self, a: &K, b: &K) -> Ordering {
        self.compare(a, b)
    }
}

/// A shared, replaceable key comparator.
///
/// Identity matters: clones of one `KeyOrder` are the same ordering, two
/// `KeyOrder`s built separately are different orderings even if they
/// compare keys identically. Tree equality and serialization rely on this.
///
/// # Examples
///
/// ```
/// use rbtree::{KeyOrder, RBTree};
///
/// let by_len = KeyOrder::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// let mut tree = RBTree::with_ordering(by_len.clone());
/// tree.insert("ccc", 3);
/// tree.insert("a", 1);
/// tree.insert("bb", 2);
/// let keys: Vec<_> = tree.keys().copied().collect();
/// assert_eq!(keys, ["a", "bb", "ccc"]);
/// assert!(tree.ordering().unwrap().same_as(&by_len));
/// ```
pub struct KeyOrder<K> {
    cmp: Rc<dyn KeyCompare<K>>,
}

impl<K> KeyOrder<K> {
    /// Wrap any comparator, closures `Fn(&K, &K) -> Ordering` included.
    pub fn new<C>(cmp: C) -> Self
    where
        C: Compare<K> + 'static,
    {
        Self { cmp: Rc::new(cmp) }
    }

    #[inline]
    pub fn compare(&self, a: &K, b: &K) -> Ordering {
        self.cmp.compare_keys(a, b)
    }

    /// True when both handles share one comparator instance.
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cmp, &other.cmp)
    }
}

impl<K: Ord + 'static> KeyOrder<K> {
    /// The natural ordering as an explicit, custom comparator.
    pub fn natural() -> Self {
        Self::new(compare::natural::<K>())
    }
}

impl<K> Clone for KeyOrder<K> {
    fn clone(&self) -> Self {
        Self {
            cmp: Rc::clone(&self.cmp),
        }
    }
}

impl<K> fmt::Debug for KeyOrder<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyOrder({:p})", Rc::as_ptr(&self.cmp))
    }
}

/// The ordering a tree currently uses.
pub(crate) enum ActiveOrder<K> {
    Natural(fn(&K, &K) -> Ordering),
    Custom(KeyOrder<K>),
}

impl<K> ActiveOrder<K> {
    pub(crate) fn natural() -> Self
    where
        K: Ord,
    {
        ActiveOrder::Natural(K::cmp)
    }

    #[inline]
    pub(crate) fn compare(&self, a: &K, b: &K) -> Ordering {
        match self {
            ActiveOrder::Natural(cmp) => cmp(a, b),
            ActiveOrder::Custom(order) => order.compare(a, b),
        }
    }

    pub(crate) fn is_natural(&self) -> bool {
        matches!(self, ActiveOrder::Natural(_))
    }

    /// Natural orderings are all the same ordering; custom ones compare by identity.
    pub(crate) fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (ActiveOrder::Natural(_), ActiveOrder::Natural(_)) => true,
            (ActiveOrder::Custom(a), ActiveOrder::Custom(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl<K> Clone for ActiveOrder<K> {
    fn clone(&self) -> Self {
        match self {
            ActiveOrder::Natural(cmp) => ActiveOrder::Natural(*cmp),
            ActiveOrder::Custom(order) => ActiveOrder::Custom(order.clone()),
        }
    }
}

/// Saved shape of one node, for rolling back a failed rebuild.
#[derive(Clone, Copy)]
struct Links {
    id: NodeId,
    left: NodeId,
    right: NodeId,
    parent: NodeId,
    color: Color,
}

impl<K, V> RBTree<K, V> {
    #[inline]
    pub(crate) fn compare_keys(&self, a: &K, b: &K) -> Ordering {
        self.order.compare(a, b)
    }

    /// The installed custom ordering, `None` while keys use their natural order.
    pub fn ordering(&self) -> Option<&KeyOrder<K>> {
        match &self.order {
            ActiveOrder::Natural(_) => None,
            ActiveOrder::Custom(order) => Some(order),
        }
    }

    pub fn has_custom_ordering(&self) -> bool {
        !self.order.is_natural()
    }

    /// Replace the ordering and rebuild the tree under it.
    ///
    /// In a unique-key tree, entries whose keys become equal under the new
    /// ordering collapse into one: the key that came first keeps its place
    /// and takes the value of the last one.
    ///
    /// # Errors
    ///
    /// `OrderingViolation` if the rebuilt sequence is not sorted under the new
    /// ordering. The tree is left exactly as it was. A panic inside the
    /// comparator is resumed after the same restoration.
    pub fn set_ordering(&mut self, order: KeyOrder<K>) -> ModifyResult<()> {
        self.readjust(ActiveOrder::Custom(order))
    }

    /// Go back to the keys' natural ordering, rebuilding the tree.
    pub fn reset_ordering(&mut self) -> ModifyResult<()>
    where
        K: Ord,
    {
        self.readjust(ActiveOrder::natural())
    }

    pub(crate) fn readjust(&mut self, order: ActiveOrder<K>) -> ModifyResult<()> {
        let previous = std::mem::replace(&mut self.order, order);
        if self.root == NIL {
            return Ok(());
        }

        debug!("rebuilding {} entries under a new ordering", self.len);
        let sequence = self.in_order_ids();
        let snapshot = self.snapshot_links(&sequence);
        let (root, len) = (self.root, self.len);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.relink(&sequence)));
        match outcome {
            Ok(Ok(collapsed)) => {
                self.absorb_collapsed(collapsed);
                Ok(())
            }
            Ok(Err(err)) => {
                warn!("ordering rebuild rejected, restoring previous ordering: {}", err);
                self.restore_links(&snapshot, root, len, previous);
                Err(err)
            }
            Err(payload) => {
                warn!("comparator panicked during rebuild, restoring previous ordering");
                self.restore_links(&snapshot, root, len, previous);
                panic::resume_unwind(payload)
            }
        }
    }

    fn snapshot_links(&self, sequence: &[NodeId]) -> Vec<Links> {
        sequence
            .iter()
            .map(|&id| {
                let node = &self.arena[id];
                Links {
                    id,
                    left: node.left,
                    right: node.right,
                    parent: node.parent,
                    color: node.color,
                }
            })
            .collect()
    }

    fn restore_links(&mut self, snapshot: &[Links], root: NodeId, len: usize, order: ActiveOrder<K>) {
        for links in snapshot {
            let node = &mut self.arena[links.id];
            node.left = links.left;
            node.right = links.right;
            node.parent = links.parent;
            node.color = links.color;
        }
        self.root = root;
        self.len = len;
        self.order = order;
    }

    /// Reinsert every node of `sequence` under the current ordering without
    /// reallocating. Returns `(collapsed, survivor)` pairs for unique-mode key
    /// collisions; collapsed nodes stay allocated until the rebuild commits.
    fn relink(&mut self, sequence: &[NodeId]) -> TreeResult<Vec<(NodeId, NodeId)>> {
        self.root = NIL;
        self.len = 0;
        let mut collapsed = Vec::new();

        for &id in sequence {
            {
                let node = &mut self.arena[id];
                node.left = NIL;
                node.right = NIL;
                node.parent = NIL;
                node.color = Color::Red;
            }
            match self.attach(id, !self.allow_duplicates) {
                Attach::Linked => {
                    self.len += 1;
                    self.insert_fixup(id);
                }
                Attach::Existing(survivor) => collapsed.push((id, survivor)),
            }
        }

        self.verify_sequence()?;
        Ok(collapsed)
    }

    /// Walk the rebuilt tree checking that neighbours are ordered.
    fn verify_sequence(&self) -> TreeResult<()> {
        let mut position = 0;
        let mut prev = self.first_id();
        if prev == NIL {
            return Ok(());
        }
        let mut current = self.next_id(prev);
        while current != NIL {
            position += 1;
            match self.compare_keys(&self.arena[prev].key, &self.arena[current].key) {
                Ordering::Greater => {
                    return Err(RBTreeError::ordering_violation(
                        position,
                        "key sorts before its predecessor",
                    ));
                }
                Ordering::Equal if !self.allow_duplicates => {
                    return Err(RBTreeError::ordering_violation(
                        position,
                        "distinct nodes compare equal in a unique tree",
                    ));
                }
                _ => {}
            }
            prev = current;
            current = self.next_id(current);
        }
        Ok(())
    }

    fn absorb_collapsed(&mut self, collapsed: Vec<(NodeId, NodeId)>) {
        if !collapsed.is_empty() {
            debug!("{} entries collapsed under the new ordering", collapsed.len());
        }
        for (id, survivor) in collapsed {
            let node = self.arena.take(id);
            self.arena[survivor].value = node.value;
        }
    }
}
