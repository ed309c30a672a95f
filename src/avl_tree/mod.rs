//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.
//!
//! [`tree`] holds the algorithms over bare trees. [`AvlMap`] and [`AvlSet`] are containers that
//! own a single tree along with the dictionary used to order it.

mod map;
mod node;
mod set;
pub mod tree;

pub use self::map::{AvlMap, AvlMapIntoIter, AvlMapIter, AvlMapIterMut};
pub use self::node::Node;
pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter};
pub use self::tree::Tree;
