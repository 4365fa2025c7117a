//! A linked BST where every node owns its children through a `Box`. The tree never balances
//! itself on insertion or deletion; [`Tree::rebalance`] rebuilds it with minimal height on
//! request.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Tree, TreeError};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.add(1);
//! assert_eq!(tree.find(&1), Some(&1));
//!
//! // Equal elements are kept, this is a multiset.
//! tree.add(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Removing an element returns it.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.remove(&1), Ok(1));
//!
//! // Removing something that isn't there is an error.
//! assert_eq!(tree.remove(&1), Err(TreeError::NotFound));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::error::TreeError;
use crate::iter::{Iter, Traversal};

type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree over totally ordered elements. Elements equal to a node are stored in
/// its right subtree so the same element may be added many times.
pub struct Tree<T> {
    root: Link<T>,
    size: usize,
}

/// A `Node` holds one element and owns both of its (possibly empty) subtrees.
pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(element: T) -> Box<Self> {
        Box::new(Self {
            element,
            left: None,
            right: None,
        })
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        Self::drop_nodes(self.root.take());
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Returns how many elements are stored, counting every copy of equal elements.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every element from the tree.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} elements", self.size);
        Self::drop_nodes(self.root.take());
        self.size = 0;
    }

    /// Returns the number of edges on the longest path from the root to a leaf.
    ///
    /// A tree with a single element has a height of `0`, and so does the empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.add(2);
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.add(1);
    /// tree.add(3);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.as_deref().map(|root| (root, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            stack.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Reports whether the tree is balanced using a heuristic based only on its height.
    ///
    /// With `n = 2^(height + 1) - 1` (the size of a complete tree of this height) the tree is
    /// balanced when `height < 2 * log2(n + 1) - 1`. Note this does not look at [`len`][Self::len]
    /// so it is a much weaker check than comparing against the minimal height for the number of
    /// stored elements.
    pub fn is_balanced(&self) -> bool {
        let height = self.height() as f64;
        let n_nodes = 2f64.powf(height + 1.0) - 1.0;

        height < 2.0 * (n_nodes + 1.0).log2() - 1.0
    }

    /// Returns a lazy preorder iterator over the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref())
    }

    /// Returns a snapshot of every element in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 3].into_iter().collect();
    /// assert_eq!(tree.inorder(), vec![&3, &3, &5, &8]);
    /// ```
    pub fn inorder(&self) -> Vec<&T> {
        let mut elements = Vec::with_capacity(self.size);
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            elements.push(&node.element);
            current = node.right.as_deref();
        }

        elements
    }

    /// Returns a snapshot of the elements in the given order. Only [`Traversal::Inorder`] is
    /// implemented, every other order is reported as [`TreeError::Unsupported`].
    pub fn traverse(&self, order: Traversal) -> Result<Vec<&T>, TreeError> {
        match order {
            Traversal::Inorder => Ok(self.inorder()),
            unsupported => Err(TreeError::Unsupported(unsupported)),
        }
    }

    /// Shorthand for [`traverse(Traversal::Preorder)`][Self::traverse]. Use [`iter`][Self::iter]
    /// for a lazy preorder walk.
    pub fn preorder(&self) -> Result<Vec<&T>, TreeError> {
        self.traverse(Traversal::Preorder)
    }

    /// Shorthand for [`traverse(Traversal::Postorder)`][Self::traverse].
    pub fn postorder(&self) -> Result<Vec<&T>, TreeError> {
        self.traverse(Traversal::Postorder)
    }

    /// Shorthand for [`traverse(Traversal::Levelorder)`][Self::traverse].
    pub fn levelorder(&self) -> Result<Vec<&T>, TreeError> {
        self.traverse(Traversal::Levelorder)
    }

    /// Rebuilds the tree so it has the smallest possible height for the number of elements it
    /// stores. The ascending order of the elements is unchanged.
    ///
    /// Each subtree is rooted at the lower midpoint of its sorted elements, the elements before
    /// it form the left subtree and the elements after it form the right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=7).collect();
    /// assert_eq!(tree.height(), 6);
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), 2);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&4, &2, &1, &3, &6, &5, &7]);
    /// ```
    pub fn rebalance(&mut self) {
        let height_before = self.height();
        let elements = Self::flatten(self.root.take(), self.size);

        self.size = elements.len();
        self.root = Self::build_balanced(&mut elements.into_iter(), self.size);
        debug!(
            "rebalanced {} elements: height {} -> {}",
            self.size,
            height_before,
            self.height()
        );
    }

    /// Consumes the tree and returns its elements in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let size = mem::take(&mut self.size);
        Self::flatten(self.root.take(), size)
    }

    /// Moves every element out of the subtree in ascending order, dropping the nodes as it goes.
    fn flatten(root: Link<T>, capacity: usize) -> Vec<T> {
        let mut elements = Vec::with_capacity(capacity);
        let mut stack = Vec::new();
        let mut current = root;
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            let Node { element, right, .. } = *node;
            elements.push(element);
            current = right;
        }

        elements
    }

    /// Builds a minimal height subtree out of the next `len` elements. The left subtree takes
    /// `len / 2` elements so the root is the lower midpoint of the range.
    fn build_balanced(elements: &mut std::vec::IntoIter<T>, len: usize) -> Link<T> {
        if len == 0 {
            return None;
        }
        let left_len = len / 2;
        let left = Self::build_balanced(elements, left_len);
        let element = elements.next()?;
        let right = Self::build_balanced(elements, len - left_len - 1);

        Some(Box::new(Node {
            element,
            left,
            right,
        }))
    }

    /// Drops a subtree one node at a time so deep trees can't overflow the stack.
    fn drop_nodes(root: Link<T>) {
        let mut stack: Vec<_> = root.into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Adds the element to the tree. Elements equal to an existing one are placed in its right
    /// subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.add(1);
    /// tree.add(1);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.find(&1), Some(&1));
    /// ```
    pub fn add(&mut self, item: T) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if item < node.element {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Node::new_boxed(item));
        self.size += 1;
    }

    /// Potentially finds the stored element equal to the given one. With duplicates, the first
    /// equal element on the search path is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add("apple".to_string());
    ///
    /// assert_eq!(tree.find(&"apple".to_string()), Some(&"apple".to_string()));
    /// assert_eq!(tree.find(&"pear".to_string()), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match item.cmp(&node.element) {
                Ordering::Equal => return Some(&node.element),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }

        None
    }

    /// Returns `true` if an element equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Removes one element equal to `item` from the tree and returns it. If no such element is
    /// stored, [`TreeError::NotFound`] is returned and the tree is left untouched.
    ///
    /// A node with two children is not unlinked itself. It takes the largest element of its left
    /// subtree and that element's node is unlinked instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Tree, TreeError};
    ///
    /// let mut tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.remove(&5), Err(TreeError::NotFound));
    /// assert_eq!(tree.inorder(), vec![&3, &8]);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T, TreeError> {
        let link = Self::locate(&mut self.root, item);
        let Some(mut node) = link.take() else {
            trace!("remove missed in tree of {} elements", self.size);
            return Err(TreeError::NotFound);
        };

        let removed = if node.left.is_some() && node.right.is_some() {
            let max = Self::pop_max(&mut node.left)
                .expect("A node with two children has a largest left descendant");
            let removed = mem::replace(&mut node.element, max);
            *link = Some(node);
            removed
        } else {
            let Node {
                element,
                left,
                right,
            } = *node;
            *link = left.or(right);
            element
        };
        self.size -= 1;

        Ok(removed)
    }

    /// Overwrites the stored element equal to `item` with `new_item` and returns the old element,
    /// or `None` if there is no such element.
    ///
    /// The tree is not re-sorted. The caller must make sure `new_item` belongs in the same
    /// position as `item`, otherwise later lookups may miss elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [(2, "b"), (1, "a")].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&(2, "b"), (2, "c")), Some((2, "b")));
    /// assert_eq!(tree.replace(&(9, "z"), (9, "y")), None);
    /// assert_eq!(tree.inorder(), vec![&(1, "a"), &(2, "c")]);
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T> {
        Self::locate(&mut self.root, item)
            .as_mut()
            .map(|node| mem::replace(&mut node.element, new_item))
    }

    /// Returns every stored element `e` with `low <= e <= high`, in ascending order. Subtrees that
    /// can't hold such an element are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.range_find(&2, &7), vec![&3, &4, &5, &7]);
    /// assert!(tree.range_find(&7, &2).is_empty());
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T> {
        let mut elements = Vec::new();
        if low > high {
            return elements;
        }

        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = if node.element >= *low {
                    node.left.as_deref()
                } else {
                    None
                };
            }
            let Some(node) = stack.pop() else {
                break;
            };
            if *low <= node.element && node.element <= *high {
                elements.push(&node.element);
            }
            current = if node.element <= *high {
                node.right.as_deref()
            } else {
                None
            };
        }

        elements
    }

    /// Returns the smallest stored element strictly greater than `item`. `item` doesn't need to be
    /// in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&4), Some(&5));
    /// assert_eq!(tree.successor(&6), Some(&7));
    /// assert_eq!(tree.successor(&9), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T> {
        let mut successor = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.element > *item {
                successor = Some(&node.element);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }

        successor
    }

    /// Returns the largest stored element strictly less than `item`. `item` doesn't need to be in
    /// the tree.
    pub fn predecessor(&self, item: &T) -> Option<&T> {
        let mut predecessor = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.element < *item {
                predecessor = Some(&node.element);
                current = node.right.as_deref();
            } else {
                current = node.left.as_deref();
            }
        }

        predecessor
    }

    /// Walks down from `link` and returns the link owning the first node equal to `item`, or the
    /// empty link where the search ended.
    ///
    /// Starting from the tree's root link means removing the root needs no special case.
    fn locate<'a>(mut link: &'a mut Link<T>, item: &T) -> &'a mut Link<T> {
        while let Some(ordering) = link.as_deref().map(|node| node.element.cmp(item)) {
            if ordering == Ordering::Equal {
                break;
            }
            // NB the direction is decided before borrowing the node mutably so that breaking out
            // of the loop doesn't leave `link` borrowed.
            if let Some(node) = link {
                link = if ordering == Ordering::Greater {
                    &mut node.left
                } else {
                    &mut node.right
                };
            }
        }

        link
    }

    /// Unlinks the largest node of the subtree and returns its element. The node's left child
    /// takes its place.
    fn pop_max(mut link: &mut Link<T>) -> Option<T> {
        while link.as_ref().is_some_and(|node| node.right.is_some()) {
            if let Some(node) = link {
                link = &mut node.right;
            }
        }
        let node = link.take()?;
        let Node { element, left, .. } = *node;
        *link = left;

        Some(element)
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders the tree rotated 90 degrees counterclockwise: the root is in the first column, the
/// right subtree is above it and every level of depth is indented by `"| "`.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        let mut current = self.root.as_deref().map(|root| (root, 0));
        loop {
            while let Some((node, level)) = current {
                stack.push((node, level));
                current = node.right.as_deref().map(|right| (right, level + 1));
            }
            let Some((node, level)) = stack.pop() else {
                break;
            };
            writeln!(f, "{}{}", "| ".repeat(level), node.element)?;
            current = node.left.as_deref().map(|left| (left, level + 1));
        }

        Ok(())
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("elements", &self.inorder())
            .finish()
    }
}
