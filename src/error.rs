use crate::iter::Traversal;

/// Errors returned by [`Tree`][crate::Tree] operations.
///
/// Queries like [`find`][crate::Tree::find] or [`successor`][crate::Tree::successor] report
/// absence with `None` instead since a miss is an ordinary outcome for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The element asked to be removed is not stored in the tree.
    #[error("item not in tree")]
    NotFound,
    /// The requested traversal order has no implementation.
    #[error("{0} traversal is not supported")]
    Unsupported(Traversal),
}
