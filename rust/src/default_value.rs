//! Default values for lookup misses.
//!
//! A tree carries at most one default: a fixed value or a resolver computed
//! from the tree and the missing key. Defaults are consulted only by the
//! default-aware lookups in this module; `get` and `fetch` never see them,
//! and a miss never inserts anything.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::error::{KeyResult, RBTreeError};
use crate::types::RBTree;

/// Resolver signature: receives the tree and the key that missed.
pub type Resolver<K, V> = Rc<dyn Fn(&RBTree<K, V>, &K) -> V>;

/// What a lookup miss produces.
pub enum DefaultValue<K, V> {
    None,
    Value(V),
    Computed(Resolver<K, V>),
}

impl<K, V> DefaultValue<K, V> {
    pub fn is_none(&self) -> bool {
        matches!(self, DefaultValue::None)
    }
}

impl<K, V> Default for DefaultValue<K, V> {
    fn default() -> Self {
        DefaultValue::None
    }
}

impl<K, V: Clone> Clone for DefaultValue<K, V> {
    fn clone(&self) -> Self {
        match self {
            DefaultValue::None => DefaultValue::None,
            DefaultValue::Value(v) => DefaultValue::Value(v.clone()),
            DefaultValue::Computed(f) => DefaultValue::Computed(Rc::clone(f)),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for DefaultValue<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::None => f.write_str("None"),
            DefaultValue::Value(v) => f.debug_tuple("Value").field(v).finish(),
            DefaultValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<K, V> RBTree<K, V> {
    /// Use a fixed value for every lookup miss, replacing any resolver.
    pub fn set_default(&mut self, value: V) {
        self.default = DefaultValue::Value(value);
    }

    /// Compute lookup misses with `resolver`, replacing any fixed value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RBTree;
    ///
    /// let mut tree: RBTree<i32, i32> = RBTree::new();
    /// tree.insert(1, 10);
    /// tree.set_default_fn(|tree, key| key * 100 + tree.len() as i32);
    /// assert_eq!(*tree.lookup(&1).unwrap(), 10);
    /// assert_eq!(*tree.lookup(&7).unwrap(), 701);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn set_default_fn<F>(&mut self, resolver: F)
    where
        F: Fn(&RBTree<K, V>, &K) -> V + 'static,
    {
        self.default = DefaultValue::Computed(Rc::new(resolver));
    }

    pub fn clear_default(&mut self) {
        self.default = DefaultValue::None;
    }

    /// The fixed default, if one is set. A resolver is not a fixed value.
    pub fn default_value(&self) -> Option<&V> {
        match &self.default {
            DefaultValue::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn has_default_fn(&self) -> bool {
        matches!(self.default, DefaultValue::Computed(_))
    }

    pub fn default_kind(&self) -> &DefaultValue<K, V> {
        &self.default
    }

    /// What a miss on `key` would produce, without looking the key up.
    pub fn default_for(&self, key: &K) -> Option<Cow<'_, V>>
    where
        V: Clone,
    {
        match &self.default {
            DefaultValue::None => None,
            DefaultValue::Value(v) => Some(Cow::Borrowed(v)),
            DefaultValue::Computed(resolver) => Some(Cow::Owned(resolver(self, key))),
        }
    }

    /// Default-aware lookup: the stored value, else the tree's default.
    pub fn lookup(&self, key: &K) -> Option<Cow<'_, V>>
    where
        V: Clone,
    {
        match self.get(key) {
            Some(v) => Some(Cow::Borrowed(v)),
            None => self.default_for(key),
        }
    }

    /// Strict lookup. Ignores any default.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` when no entry has `key`.
    pub fn fetch(&self, key: &K) -> KeyResult<&V> {
        self.get(key).ok_or(RBTreeError::KeyNotFound)
    }

    /// Strict lookup with a caller-supplied fallback.
    pub fn fetch_or<'a>(&'a self, key: &K, fallback: &'a V) -> &'a V {
        self.get(key).unwrap_or(fallback)
    }

    /// Strict lookup computing the fallback from the missing key.
    pub fn fetch_or_else<F>(&self, key: &K, fallback: F) -> Cow<'_, V>
    where
        V: Clone,
        F: FnOnce(&K) -> V,
    {
        match self.get(key) {
            Some(v) => Cow::Borrowed(v),
            None => Cow::Owned(fallback(key)),
        }
    }

    /// Default-aware lookup of several keys at once.
    pub fn values_at<'a, I>(&'a self, keys: I) -> Vec<Option<Cow<'a, V>>>
    where
        V: Clone,
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        keys.into_iter().map(|key| self.lookup(key)).collect()
    }
}
