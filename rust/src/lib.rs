//! Red-black tree map in Rust with optional duplicate keys.
//!
//! This crate provides an ordered map built on a red-black tree, supporting
//! unique-key and duplicate-key modes, replaceable key orderings, default
//! values for lookup misses, bound and range queries, and traversals that
//! may schedule deletions while they run.
//!
//! # Examples
//!
//! ```
//! use rbtree::{KeyOrder, RBTree};
//!
//! let mut tree = RBTree::multi();
//! tree.insert(2, "x");
//! tree.insert(2, "y");
//! tree.insert(1, "w");
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.lower_bound(&2), Some((&2, &"x")));
//! assert_eq!(tree.upper_bound(&2), Some((&2, &"y")));
//!
//! tree.set_ordering(KeyOrder::new(|a: &i32, b: &i32| b.cmp(a))).unwrap();
//! assert_eq!(tree.first(), Some((&2, &"x")));
//! ```

#[macro_use]
mod macros;

mod arena;
mod codec;
mod construction;
mod default_value;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod merge_operations;
mod ordering;
mod range_queries;
mod tree_structure;
mod types;
mod validation;

pub use arena::ArenaStats;
pub use default_value::{DefaultValue, Resolver};
pub use error::{KeyResult, ModifyResult, RBTreeError, RBTreeResult, RBTreeResultExt};
pub use iteration::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut, Visit};
pub use ordering::KeyOrder;
pub use range_queries::Range;
pub use types::{Color, NodeId, RBTree, NIL};
