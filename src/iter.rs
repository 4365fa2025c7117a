//! Traversal orders and the lazy default iterator over a [`Tree`][crate::Tree].
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Traversal, Tree, TreeError};
//!
//! let tree: Tree<i32> = [5, 3, 8].into_iter().collect();
//!
//! // Default iteration visits nodes in preorder.
//! assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&5, &3, &8]);
//!
//! // The inorder snapshot is ascending.
//! assert_eq!(tree.traverse(Traversal::Inorder), Ok(vec![&3, &5, &8]));
//!
//! // Other orders are reported as unsupported rather than empty.
//! assert_eq!(
//!     tree.traverse(Traversal::Postorder),
//!     Err(TreeError::Unsupported(Traversal::Postorder))
//! );
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::linked::Node;

/// The orders in which a tree can be walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Node, then left subtree, then right subtree.
    Preorder,
    /// Left subtree, then node, then right subtree. Yields ascending elements.
    Inorder,
    /// Left subtree, then right subtree, then node.
    Postorder,
    /// Breadth first, one depth level at a time.
    Levelorder,
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Preorder => "preorder",
            Self::Inorder => "inorder",
            Self::Postorder => "postorder",
            Self::Levelorder => "levelorder",
        };
        f.write_str(name)
    }
}

/// A lazy, single pass preorder iterator over the elements of a tree.
///
/// Created by [`Tree::iter`][crate::Tree::iter]. It keeps the nodes still to be visited on an
/// explicit stack so arbitrarily deep trees can be walked.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree is popped before it.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(&node.element)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
