//! Serialization and structural equality.
//!
//! The serialized form is a flat tuple: the entry count as an `i32`, then
//! one `(key, value)` tuple per entry in order. Only trees under the
//! natural ordering with at least one entry are written; a comparator
//! cannot be serialized, so a tree read back could not reproduce it.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{self, Serialize, SerializeTuple, Serializer};

use crate::error::{RBTreeError, RBTreeResult};
use crate::types::RBTree;

impl<K, V> RBTree<K, V> {
    /// The entry count to write, or why this tree cannot be written.
    ///
    /// # Errors
    ///
    /// `SerializationRefused` for an empty tree, a tree with a custom
    /// ordering, or more entries than an `i32` count can express.
    pub fn serializable_count(&self) -> RBTreeResult<i32> {
        if self.is_empty() {
            return Err(RBTreeError::serialization_refused("tree is empty"));
        }
        if self.has_custom_ordering() {
            return Err(RBTreeError::serialization_refused(
                "cannot dump a tree with a custom ordering",
            ));
        }
        i32::try_from(self.len).map_err(|_| {
            RBTreeError::serialization_refused(&format!("{} entries exceed the record count", self.len))
        })
    }

    /// Deserialize into a tree that keeps duplicate keys.
    ///
    /// Suitable for `#[serde(deserialize_with = "RBTree::deserialize_multi")]`.
    pub fn deserialize_multi<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
        K: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
    {
        deserializer.deserialize_tuple(usize::MAX, TreeVisitor::new(true))
    }
}

impl<K: Serialize, V: Serialize> Serialize for RBTree<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let count = self.serializable_count().map_err(ser::Error::custom)?;
        let mut record = serializer.serialize_tuple(self.len + 1)?;
        record.serialize_element(&count)?;
        for entry in self.iter() {
            record.serialize_element(&entry)?;
        }
        record.end()
    }
}

impl<'de, K, V> Deserialize<'de> for RBTree<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_tuple(usize::MAX, TreeVisitor::new(false))
    }
}

struct TreeVisitor<K, V> {
    allow_duplicates: bool,
    marker: PhantomData<fn() -> RBTree<K, V>>,
}

impl<K, V> TreeVisitor<K, V> {
    fn new(allow_duplicates: bool) -> Self {
        Self {
            allow_duplicates,
            marker: PhantomData,
        }
    }
}

impl<'de, K, V> Visitor<'de> for TreeVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = RBTree<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an entry count followed by that many (key, value) pairs")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let count: i32 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let count = usize::try_from(count).map_err(|_| {
            de::Error::custom(RBTreeError::invalid_argument(
                "count",
                &format!("negative entry count {}", count),
            ))
        })?;

        let mut tree = if self.allow_duplicates {
            RBTree::multi()
        } else {
            RBTree::new()
        };
        for index in 0..count {
            let (key, value): (K, V) = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(index + 1, &self))?;
            tree.insert(key, value);
        }
        Ok(tree)
    }
}

/// Equal when both trees hold the same entries in the same order under the
/// same ordering instance. The duplicate mode is not compared.
impl<K: PartialEq, V: PartialEq> PartialEq for RBTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.same_ordering(other)
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for RBTree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RBTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyOrder;
    use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_ser_tokens_error, assert_tokens, Token};

    #[test]
    fn test_record_layout() {
        let tree = RBTree::from([(2, -2), (1, -1)]);
        assert_tokens(
            &tree,
            &[
                Token::Tuple { len: 3 },
                Token::I32(2),
                Token::Tuple { len: 2 },
                Token::I32(1),
                Token::I32(-1),
                Token::TupleEnd,
                Token::Tuple { len: 2 },
                Token::I32(2),
                Token::I32(-2),
                Token::TupleEnd,
                Token::TupleEnd,
            ],
        );
    }

    #[test]
    fn test_refuses_empty_tree() {
        let tree: RBTree<i32, i32> = RBTree::new();
        assert_ser_tokens_error(
            &tree,
            &[],
            "Serialization refused: cannot dump tree: tree is empty",
        );
        assert!(tree.serializable_count().unwrap_err().is_serialization_refused());
    }

    #[test]
    fn test_refuses_custom_ordering() {
        let mut tree = RBTree::with_ordering(KeyOrder::new(|a: &i32, b: &i32| b.cmp(a)));
        tree.insert(1, 1);
        assert_ser_tokens_error(
            &tree,
            &[],
            "Serialization refused: cannot dump tree: cannot dump a tree with a custom ordering",
        );
    }

    #[test]
    fn test_negative_count_is_rejected() {
        assert_de_tokens_error::<RBTree<i32, i32>>(
            &[Token::Tuple { len: 1 }, Token::I32(-1)],
            "Invalid argument: count: negative entry count -1",
        );
    }

    #[test]
    fn test_deserialized_duplicates_collapse_in_unique_tree() {
        let expected = RBTree::from([(7, 2)]);
        assert_de_tokens(
            &expected,
            &[
                Token::Tuple { len: 3 },
                Token::I32(2),
                Token::Tuple { len: 2 },
                Token::I32(7),
                Token::I32(1),
                Token::TupleEnd,
                Token::Tuple { len: 2 },
                Token::I32(7),
                Token::I32(2),
                Token::TupleEnd,
                Token::TupleEnd,
            ],
        );
    }

    #[test]
    fn test_equality_requires_same_ordering_instance() {
        let order = KeyOrder::new(|a: &i32, b: &i32| a.cmp(b));
        let mut a = RBTree::with_ordering(order.clone());
        let mut b = RBTree::with_ordering(order);
        let mut c = RBTree::with_ordering(KeyOrder::new(|a: &i32, b: &i32| a.cmp(b)));
        for tree in [&mut a, &mut b, &mut c] {
            tree.insert(1, 'x');
        }
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, RBTree::from([(1, 'x')]));
    }

    #[test]
    fn test_equality_ignores_duplicate_mode() {
        let unique = RBTree::from([(1, 'a'), (2, 'b')]);
        let mut multi = RBTree::multi();
        multi.insert(2, 'b');
        multi.insert(1, 'a');
        assert_eq!(unique, multi);
        multi.insert(2, 'b');
        assert_ne!(unique, multi);
    }

    #[test]
    fn test_debug_lists_entries() {
        let tree = RBTree::from([(2, "b"), (1, "a")]);
        assert_eq!(format!("{:?}", tree), r#"{1: "a", 2: "b"}"#);
    }
}
