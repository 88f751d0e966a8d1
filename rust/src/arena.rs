//! Index-addressed node storage.
//!
//! Nodes live in a `Vec` and refer to each other by `NodeId`. Freed slots go
//! on a free list and are reused by the next allocation. `NIL` is a reserved
//! id that never names a slot; it plays the role of the shared black
//! sentinel terminating every leaf edge.

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// The sentinel id. Never allocated, never mutated, always black.
pub const NIL: NodeId = u32::MAX;

/// Statistics for a node arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeArena<T> {
    storage: Vec<Option<T>>,
    free_list: Vec<NodeId>,
    allocated: usize,
}

impl<T> NodeArena<T> {
    pub(crate) fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            allocated: 0,
        }
    }

    /// Allocate a new item in the arena and return its ID
    #[inline]
    pub(crate) fn allocate(&mut self, item: T) -> NodeId {
        self.allocated += 1;
        if let Some(free_id) = self.free_list.pop() {
            self.storage[free_id as usize] = Some(item);
            return free_id;
        }

        let index = self.storage.len();
        // NIL is reserved, so the last representable id is never handed out.
        assert!(index < NIL as usize, "node arena exhausted ({} slots)", index);
        self.storage.push(Some(item));
        index as NodeId
    }

    /// Remove an item and return it; `None` for NIL or a free slot.
    #[inline]
    pub(crate) fn deallocate(&mut self, id: NodeId) -> Option<T> {
        let index = usize::try_from(id).ok()?;
        let item = self.storage.get_mut(index)?.take()?;
        self.free_list.push(id);
        self.allocated -= 1;
        Some(item)
    }

    /// Remove an item the caller knows is live.
    #[inline]
    pub(crate) fn take(&mut self, id: NodeId) -> T {
        match self.deallocate(id) {
            Some(item) => item,
            None => panic!("node {} is not allocated", id),
        }
    }

    /// Mutable access to two distinct live items at once.
    pub(crate) fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut T, &mut T) {
        assert!(a != b, "pair_mut needs distinct ids, got {} twice", a);
        let (low, high, flipped) = if a < b { (a, b, false) } else { (b, a, true) };
        let (head, tail) = self.storage.split_at_mut(high as usize);
        let first = head[low as usize].as_mut();
        let second = tail[0].as_mut();
        match (first, second) {
            (Some(x), Some(y)) if flipped => (y, x),
            (Some(x), Some(y)) => (x, y),
            _ => panic!("node {} or {} is not allocated", a, b),
        }
    }

    /// Every slot in id order, `None` for free ones.
    pub(crate) fn slots_mut(&mut self) -> Vec<Option<&mut T>> {
        self.storage.iter_mut().map(Option::as_mut).collect()
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        if id == NIL {
            return None;
        }
        self.storage.get(id as usize)?.as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if id == NIL {
            return None;
        }
        self.storage.get_mut(id as usize)?.as_mut()
    }

    /// Check if an ID is valid and allocated
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.allocated
    }

    pub(crate) fn stats(&self) -> ArenaStats {
        let total_capacity = self.storage.capacity();
        let utilization = if total_capacity > 0 {
            self.allocated as f64 / total_capacity as f64
        } else {
            0.0
        };

        ArenaStats {
            total_capacity,
            allocated_count: self.allocated,
            free_count: self.free_list.len(),
            utilization,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.storage.clear();
        self.free_list.clear();
        self.allocated = 0;
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Indexing is reserved for ids the tree itself linked; a miss is a broken
// invariant, not a caller error.
impl<T> Index<NodeId> for NodeArena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(item) => item,
            None => panic!("node {} is not allocated", id),
        }
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(item) => item,
            None => panic!("node {} is not allocated", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_basic_operations() {
        let mut arena = NodeArena::new();

        let id1 = arena.allocate(42);
        let id2 = arena.allocate(84);
        let id3 = arena.allocate(126);

        assert_eq!(arena.get(id1), Some(&42));
        assert_eq!(arena[id2], 84);
        assert_eq!(arena.get(id3), Some(&126));

        assert!(arena.contains(id1));
        assert!(!arena.contains(NIL));
        assert_eq!(arena.get(NIL), None);

        let stats = arena.stats();
        assert_eq!(stats.allocated_count, 3);
        assert_eq!(stats.free_count, 0);
    }

    #[test]
    fn test_deallocate_reuses_slot() {
        let mut arena = NodeArena::new();
        let id1 = arena.allocate("a");
        let id2 = arena.allocate("b");

        assert_eq!(arena.deallocate(id1), Some("a"));
        assert_eq!(arena.deallocate(id1), None);
        assert!(!arena.contains(id1));
        assert_eq!(arena.stats().free_count, 1);

        let id3 = arena.allocate("c");
        assert_eq!(id3, id1);
        assert_eq!(arena[id3], "c");
        assert_eq!(arena[id2], "b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.stats().free_count, 0);
    }

    #[test]
    fn test_deallocate_nil_is_noop() {
        let mut arena: NodeArena<u8> = NodeArena::with_capacity(4);
        assert_eq!(arena.deallocate(NIL), None);
        assert_eq!(arena.len(), 0);
        assert!(arena.stats().total_capacity >= 4);
    }

    #[test]
    fn test_pair_mut_returns_in_argument_order() {
        let mut arena = NodeArena::new();
        let a = arena.allocate(String::from("a"));
        let b = arena.allocate(String::from("b"));

        let (x, y) = arena.pair_mut(b, a);
        std::mem::swap(x, y);
        assert_eq!(arena[a], "b");
        assert_eq!(arena[b], "a");
        assert_eq!(arena.take(a), "b");
        assert!(!arena.contains(a));
    }

    #[test]
    fn test_slots_mut_skips_nothing() {
        let mut arena = NodeArena::new();
        let a = arena.allocate(1);
        let _b = arena.allocate(2);
        arena.deallocate(a);
        let slots = arena.slots_mut();
        assert_eq!(slots.len(), 2);
        assert!(slots[0].is_none());
        assert_eq!(slots[1].as_deref(), Some(&2));
    }

    #[test]
    #[should_panic(expected = "is not allocated")]
    fn test_index_freed_slot_panics() {
        let mut arena = NodeArena::new();
        let id = arena.allocate(1u32);
        arena.deallocate(id);
        let _ = arena[id];
    }
}
