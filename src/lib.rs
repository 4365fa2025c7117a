//! This crate exposes a linked Binary Search Tree (BST) usable as a sorted
//! multiset: ordered iteration, range scans and nearest-neighbour queries over
//! any totally ordered element type.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores an element and
//! will sometimes have child `Node`s. The invariants kept by this tree are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree hold an element
//!    less than its own element.
//! 2. For every `Node`, all the `Node`s in its right subtree hold an element
//!    greater than or equal to its own element. Equal elements are allowed.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` where `height` is the longest path from the
//! root `Node` to a leaf `Node`. This tree does *not* balance itself: inserting
//! sorted input produces a tree shaped like a linked list. Calling
//! [`Tree::rebalance`] rebuilds it with the smallest possible height, which is
//! `O(lg N)` for `N` elements.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree: Tree<i32> = (1..=7).collect();
//! assert_eq!(tree.height(), 6);
//!
//! tree.rebalance();
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.range_find(&3, &5), vec![&3, &4, &5]);
//! assert_eq!(tree.successor(&4), Some(&5));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
pub mod iter;
pub mod linked;

pub use error::TreeError;
pub use iter::Traversal;
pub use linked::Tree;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
