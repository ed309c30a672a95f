//! Ordered collections built on an AVL tree whose ordering is supplied by an explicit comparator
//! dictionary rather than by the key type's `Ord` implementation.
//!
//! The tree algorithms in [`avl_tree::tree`] take the dictionary as an argument on every call.
//! [`AvlMap`](avl_tree::AvlMap) and [`AvlSet`](avl_tree::AvlSet) store a dictionary alongside a
//! single tree and delegate to those algorithms.
//!
//! # Examples
//!
//! ```
//! use dict_collections::avl_tree::AvlMap;
//! use dict_collections::ord::ReverseOrd;
//! use dict_collections::ord::NaturalOrd;
//!
//! let mut map = AvlMap::with_dict(ReverseOrd(NaturalOrd));
//! map.insert(1, "a");
//! map.insert(2, "b");
//!
//! assert_eq!(map.min(), Some(&2));
//! assert_eq!(map.lookup_lt(&1), Some((&2, &"b")));
//! ```

pub mod avl_tree;
pub mod entry;
pub mod error;
pub mod ord;
