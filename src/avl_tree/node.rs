use crate::avl_tree::tree;
use serde_derive::{Deserialize, Serialize};
use std::cmp;

/// A struct representing an internal node of an avl tree.
///
/// The fields are public so trees can be assembled by hand, but a hand-built tree is only valid
/// for the tree operations if it passes `tree::check_invariants`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Node<E> {
    pub entry: E,
    pub height: i32,
    pub left: tree::Tree<E>,
    pub right: tree::Tree<E>,
}

impl<E> Node<E> {
    pub fn new(entry: E) -> Self {
        Node {
            entry,
            height: 0,
            left: None,
            right: None,
        }
    }

    pub(crate) fn with_children(entry: E, left: tree::Tree<E>, right: tree::Tree<E>) -> Self {
        let mut node = Node {
            entry,
            height: 0,
            left,
            right,
        };
        node.update();
        node
    }

    pub fn update(&mut self) {
        let Node {
            ref mut height,
            ref left,
            ref right,
            ..
        } = self;
        *height = cmp::max(tree::height(left), tree::height(right)) + 1;
    }

    pub fn balance(&self) -> i32 {
        tree::height(&self.left) - tree::height(&self.right)
    }
}
