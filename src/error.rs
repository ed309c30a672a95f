//! Structural-integrity errors reported by the invariant checker.

use thiserror::Error;

/// A violation of one of the invariants of an AVL tree or of a container wrapping one.
///
/// Only produced by `check_invariants`. Trees built solely through the tree operations under a
/// total-order dictionary never fail the check.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvariantError {
    /// The cached height of a node does not match the heights of its children.
    #[error("cached height {cached} at depth {depth} does not match computed height {computed}")]
    Height {
        depth: usize,
        cached: i32,
        computed: i32,
    },
    /// The heights of the children of a node differ by more than one.
    #[error("subtrees at depth {depth} have unbalanced heights {left} and {right}")]
    Balance { depth: usize, left: i32, right: i32 },
    /// A key is not strictly between the keys of its left and right subtrees.
    #[error("key at depth {depth} is out of order with respect to its subtrees")]
    Ordering { depth: usize },
    /// A container's cached length disagrees with the number of entries in its tree.
    #[error("cached length {cached} does not match the {actual} entries in the tree")]
    Length { cached: usize, actual: usize },
}

/// Convenience alias for results of the invariant checker.
pub type Result<T> = std::result::Result<T, InvariantError>;
