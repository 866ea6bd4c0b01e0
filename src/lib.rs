//! An ordered set implemented with an AVL tree threaded by a sorted
//! doubly-linked list.
//!
//! [`LinkedAvlTree`] keeps every value in two structures at once: an AVL
//! tree for O(log n) search, insertion and removal, and a doubly-linked
//! list that holds the same nodes in ascending order for O(1) bidirectional
//! stepping. Two permanent sentinel nodes bracket the list, so the smallest
//! and largest values are always one link away from a fixed endpoint.
//!
//! ```
//! use linked_avl::LinkedAvlTree;
//!
//! let mut tree = LinkedAvlTree::new();
//! for value in [5, 3, 8, 1, 4] {
//!     tree.insert(value);
//! }
//! assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
//! assert_eq!(tree.front(), Ok(1));
//! assert_eq!(tree.back(), Ok(8));
//!
//! let mut cursor = tree.find(4);
//! cursor.move_next();
//! assert_eq!(cursor.value(), Some(5));
//! ```
//!
//! The `consistency_check` feature exposes
//! [`LinkedAvlTree::check_consistency`], which asserts the AVL balance,
//! cached heights, search order, list threading and length invariants.

mod cursor;
mod error;
mod node;
mod stack;
mod tree;

pub use cursor::{Cursor, Iter};
pub use error::Underflow;
pub use stack::Stack;
pub use tree::LinkedAvlTree;
