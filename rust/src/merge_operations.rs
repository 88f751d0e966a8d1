//! Whole-tree operations combining two trees.
//!
//! Entries flow freely from a unique tree into a multi tree but never the
//! other way: folding a multi tree into a unique one would silently collapse
//! its duplicates, so it is refused with `IncompatibleOperand`.

use crate::error::{ModifyResult, RBTreeError};
use crate::types::RBTree;

impl<K, V> RBTree<K, V> {
    fn check_compatible(&self, other: &RBTree<K, V>, operation: &str) -> ModifyResult<()> {
        if !self.allow_duplicates && other.allow_duplicates {
            return Err(RBTreeError::incompatible(
                operation,
                "cannot take entries from a tree with duplicate keys into a unique tree",
            ));
        }
        Ok(())
    }

    /// Insert every entry of `other` into this tree.
    ///
    /// # Errors
    ///
    /// `IncompatibleOperand` if this tree is unique and `other` is not.
    pub fn update(&mut self, other: &RBTree<K, V>) -> ModifyResult<()>
    where
        K: Clone,
        V: Clone,
    {
        self.check_compatible(other, "update")?;
        for (k, v) in other.iter() {
            self.insert(k.clone(), v.clone());
        }
        Ok(())
    }

    /// Like [`update`](Self::update), but when a key is already present the
    /// value written is `resolve(key, current, incoming)`. A multi tree adds
    /// the resolved value as a new entry; `current` is the first equal one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let mut stock = RBTree::from([("apples", 3), ("pears", 1)]);
    /// let delivery = RBTree::from([("apples", 5), ("plums", 2)]);
    /// stock.update_with(&delivery, |_, have, got| have + got).unwrap();
    /// assert_eq!(stock.get(&"apples"), Some(&8));
    /// assert_eq!(stock.get(&"plums"), Some(&2));
    /// ```
    pub fn update_with<F>(&mut self, other: &RBTree<K, V>, mut resolve: F) -> ModifyResult<()>
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V, &V) -> V,
    {
        self.check_compatible(other, "update")?;
        for (k, v) in other.iter() {
            match self.find_node(k) {
                Some(id) => {
                    let merged = resolve(k, &self.arena[id].value, v);
                    if self.allow_duplicates {
                        self.insert(k.clone(), merged);
                    } else {
                        self.arena[id].value = merged;
                    }
                }
                None => {
                    self.insert(k.clone(), v.clone());
                }
            }
        }
        Ok(())
    }

    /// A copy of this tree updated with `other`.
    pub fn merge(&self, other: &RBTree<K, V>) -> ModifyResult<Self>
    where
        K: Clone,
        V: Clone,
    {
        self.check_compatible(other, "merge")?;
        let mut merged = self.clone();
        merged.update(other)?;
        Ok(merged)
    }

    /// Make this tree a copy of `other`: entries, ordering and default. The
    /// duplicate mode stays this tree's own.
    pub fn replace(&mut self, other: &RBTree<K, V>) -> ModifyResult<()>
    where
        K: Clone,
        V: Clone,
    {
        self.check_compatible(other, "replace")?;
        self.clear();
        self.order = other.order.clone();
        self.default = other.default.clone();
        for (k, v) in other.iter() {
            self.insert(k.clone(), v.clone());
        }
        Ok(())
    }

    /// A tree mapping each value to its key, under the values' natural
    /// order and this tree's duplicate mode. In a unique result the last
    /// key for a repeated value wins.
    pub fn invert(&self) -> RBTree<V, K>
    where
        K: Clone,
        V: Ord + Clone,
    {
        let mut inverted = if self.allow_duplicates {
            RBTree::multi()
        } else {
            RBTree::new()
        };
        for (k, v) in self.iter() {
            inverted.insert(v.clone(), k.clone());
        }
        inverted
    }

    /// True when both trees order keys with the same ordering instance.
    pub fn same_ordering(&self, other: &RBTree<K, V>) -> bool {
        self.order.same_as(&other.order)
    }
}
