//! Algorithms over owned AVL trees.
//!
//! Every function that needs to order entries takes the comparator dictionary explicitly. All
//! structural changes rebalance bottom-up through `balance`, so the ordering and height
//! invariants hold again by the time any public function returns.

use crate::avl_tree::node::Node;
use crate::entry::Entry;
use crate::error::{InvariantError, Result};
use crate::ord::OrdDict;
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::mem;

pub type Tree<E> = Option<Box<Node<E>>>;

/// Returns the height of a tree. The empty tree has a height of `-1`.
pub fn height<E>(tree: &Tree<E>) -> i32 {
    match tree {
        None => -1,
        Some(node) => node.height,
    }
}

fn rotate_left<E>(mut node: Box<Node<E>>) -> Box<Node<E>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<E>(mut node: Box<Node<E>>) -> Box<Node<E>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// precondition: both subtrees are avl trees whose heights differ by at most two. insert, alter,
// remove and remove_min change one subtree's height by at most one; graft_left/right attach a node
// within two of its sibling and each level above grows by at most one.
fn balance<E>(tree: &mut Tree<E>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance() > 1 {
        if let Some(child) = node.left.take() {
            if child.balance() < 0 {
                node.left = Some(rotate_left(child));
            } else {
                node.left = Some(child);
            }
        }
        node = rotate_right(node);
    } else if node.balance() < -1 {
        if let Some(child) = node.right.take() {
            if child.balance() > 0 {
                node.right = Some(rotate_right(child));
            } else {
                node.right = Some(child);
            }
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

// Detaches the minimum node of the tree rooted at `node`, returning it together with what is
// left of the tree.
fn remove_min<E>(mut node: Box<Node<E>>) -> (Box<Node<E>>, Tree<E>) {
    match node.left.take() {
        Some(left) => {
            let (min, rest) = remove_min(left);
            node.left = rest;
            let mut tree = Some(node);
            balance(&mut tree);
            (min, tree)
        },
        None => {
            let rest = node.right.take();
            (node, rest)
        },
    }
}

// Removes the root of the tree and returns its entry. The caller is responsible for rebalancing.
fn remove_root<E>(tree: &mut Tree<E>) -> Option<E> {
    tree.take().map(|node| {
        let Node {
            entry, left, right, ..
        } = *node;
        *tree = match (left, right) {
            (None, right) => right,
            (left, None) => left,
            (left, Some(right)) => {
                let (mut successor, right) = remove_min(right);
                successor.left = left;
                successor.right = right;
                Some(successor)
            },
        };
        entry
    })
}

/// Returns the entry whose key compares equal to `key`.
pub fn lookup<'a, E, D>(dict: &D, key: &E::Key, tree: &'a Tree<E>) -> Option<&'a E>
where
    E: Entry,
    D: OrdDict<E::Key>,
{
    let mut curr = tree;
    while let Some(node) = curr {
        match dict.compare(key, node.entry.key()) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&node.entry),
        }
    }
    None
}

/// Returns a mutable reference to the entry whose key compares equal to `key`. The entry's key
/// must not be changed in a way that moves its position in the order.
pub fn lookup_mut<'a, E, D>(dict: &D, key: &E::Key, tree: &'a mut Tree<E>) -> Option<&'a mut E>
where
    E: Entry,
    D: OrdDict<E::Key>,
{
    tree.as_mut().and_then(|node| {
        match dict.compare(key, node.entry.key()) {
            Ordering::Less => lookup_mut(dict, key, &mut node.left),
            Ordering::Greater => lookup_mut(dict, key, &mut node.right),
            Ordering::Equal => Some(&mut node.entry),
        }
    })
}

/// Returns the entry with the greatest key that is strictly less than `key`.
pub fn lookup_lt<'a, E, D>(dict: &D, key: &E::Key, tree: &'a Tree<E>) -> Option<&'a E>
where
    E: Entry,
    D: OrdDict<E::Key>,
{
    let mut ret = None;
    let mut curr = tree;
    while let Some(node) = curr {
        match dict.compare(key, node.entry.key()) {
            // everything in the left subtree is smaller than `key`
            Ordering::Equal => return max(&node.left).or(ret),
            Ordering::Less => curr = &node.left,
            Ordering::Greater => {
                ret = Some(&node.entry);
                curr = &node.right;
            },
        }
    }
    ret
}

pub fn min<E>(tree: &Tree<E>) -> Option<&E> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(left_node) = &curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<E>(tree: &Tree<E>) -> Option<&E> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(right_node) = &curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

/// Inserts an entry into the tree. If an entry with an equal key exists, it is replaced and
/// returned.
pub fn insert<E, D>(dict: &D, entry: E, tree: &mut Tree<E>) -> Option<E>
where
    E: Entry,
    D: OrdDict<E::Key>,
{
    let ret = match tree {
        Some(node) => match dict.compare(entry.key(), node.entry.key()) {
            Ordering::Less => insert(dict, entry, &mut node.left),
            Ordering::Greater => insert(dict, entry, &mut node.right),
            Ordering::Equal => return Some(mem::replace(&mut node.entry, entry)),
        },
        None => {
            *tree = Some(Box::new(Node::new(entry)));
            return None;
        },
    };

    balance(tree);
    ret
}

/// Finds the position of `probe` in the tree and lets `f` decide what lives there.
///
/// `f` is called exactly once with the probe and the entry currently stored under the probe's
/// key, if any. If it returns `Some(entry)`, that entry is stored at the probe's position,
/// either replacing the existing entry or as a new node. If it returns `None`, the existing
/// entry is removed. The key of a returned entry must compare equal to the probe.
///
/// Returns the entry that was replaced or removed.
pub fn alter<E, D, Q, F>(dict: &D, probe: Q, tree: &mut Tree<E>, f: F) -> Option<E>
where
    E: Entry,
    D: OrdDict<E::Key>,
    Q: Borrow<E::Key>,
    F: FnOnce(Q, Option<&E>) -> Option<E>,
{
    let ret = match tree {
        Some(node) => match dict.compare(probe.borrow(), node.entry.key()) {
            Ordering::Less => alter(dict, probe, &mut node.left, f),
            Ordering::Greater => alter(dict, probe, &mut node.right, f),
            Ordering::Equal => match f(probe, Some(&node.entry)) {
                Some(entry) => return Some(mem::replace(&mut node.entry, entry)),
                None => remove_root(tree),
            },
        },
        None => {
            if let Some(entry) = f(probe, None) {
                *tree = Some(Box::new(Node::new(entry)));
            }
            return None;
        },
    };

    balance(tree);
    ret
}

/// Removes and returns the entry whose key compares equal to `key`. The tree is left untouched
/// if there is no such entry.
pub fn remove<E, D>(dict: &D, key: &E::Key, tree: &mut Tree<E>) -> Option<E>
where
    E: Entry,
    D: OrdDict<E::Key>,
{
    let ret = match tree {
        Some(node) => match dict.compare(key, node.entry.key()) {
            Ordering::Less => remove(dict, key, &mut node.left),
            Ordering::Greater => remove(dict, key, &mut node.right),
            Ordering::Equal => remove_root(tree),
        },
        None => return None,
    };

    if ret.is_some() {
        balance(tree);
    }
    ret
}

/// Splits a tree into the entries with keys less than `key`, the entry with a key equal to
/// `key`, and the entries with keys greater than `key`.
pub fn split<E, D>(dict: &D, key: &E::Key, tree: Tree<E>) -> (Tree<E>, Option<E>, Tree<E>)
where
    E: Entry,
    D: OrdDict<E::Key>,
{
    let node = match tree {
        Some(node) => node,
        None => return (None, None, None),
    };
    trace!("splitting subtree of height {}", node.height);

    let Node {
        entry, left, right, ..
    } = *node;
    match dict.compare(key, entry.key()) {
        Ordering::Equal => (left, Some(entry), right),
        Ordering::Less => {
            let (less, found, greater) = split(dict, key, left);
            (less, found, join(dict, entry, greater, right))
        },
        Ordering::Greater => {
            let (less, found, greater) = split(dict, key, right);
            (join(dict, entry, left, less), found, greater)
        },
    }
}

// precondition: the right spine of `tree` reaches a node whose right child has a height of at
// most `small_height + 1`
fn graft_right<E>(tree: &mut Tree<E>, entry: E, small: Tree<E>, small_height: i32) {
    if let Some(node) = tree {
        if height(&node.right) <= small_height + 1 {
            let right = node.right.take();
            node.right = Some(Box::new(Node::with_children(entry, right, small)));
        } else {
            graft_right(&mut node.right, entry, small, small_height);
        }
    }
    balance(tree);
}

fn graft_left<E>(tree: &mut Tree<E>, entry: E, small: Tree<E>, small_height: i32) {
    if let Some(node) = tree {
        if height(&node.left) <= small_height + 1 {
            let left = node.left.take();
            node.left = Some(Box::new(Node::with_children(entry, small, left)));
        } else {
            graft_left(&mut node.left, entry, small, small_height);
        }
    }
    balance(tree);
}

/// Joins two trees and an entry that sits strictly between them into a single tree.
///
/// Every key in `left` must be less than the key of `entry`, which must be less than every key
/// in `right`. The cost is proportional to the difference in height of the two trees.
pub fn join<E, D>(dict: &D, entry: E, left: Tree<E>, right: Tree<E>) -> Tree<E>
where
    E: Entry,
    D: OrdDict<E::Key>,
{
    let left_height = height(&left);
    let right_height = height(&right);
    trace!("joining subtrees of heights {} and {}", left_height, right_height);

    match (left, right) {
        (None, mut tree) | (mut tree, None) => {
            insert(dict, entry, &mut tree);
            tree
        },
        (left, right) => {
            if (left_height - right_height).abs() <= 1 {
                Some(Box::new(Node::with_children(entry, left, right)))
            } else if left_height > right_height {
                let mut tree = left;
                graft_right(&mut tree, entry, right, right_height);
                tree
            } else {
                let mut tree = right;
                graft_left(&mut tree, entry, left, left_height);
                tree
            }
        },
    }
}

// Returns the height of the subtree along with its minimum and maximum entries.
fn check_subtree<'a, E, D>(
    dict: &D,
    tree: &'a Tree<E>,
    depth: usize,
) -> Result<(i32, Option<(&'a E, &'a E)>)>
where
    E: Entry,
    D: OrdDict<E::Key>,
{
    let node = match tree {
        Some(node) => node,
        None => return Ok((-1, None)),
    };

    let (left_height, left_bounds) = check_subtree(dict, &node.left, depth + 1)?;
    let (right_height, right_bounds) = check_subtree(dict, &node.right, depth + 1)?;

    let computed = cmp::max(left_height, right_height) + 1;
    if node.height != computed {
        return Err(InvariantError::Height {
            depth,
            cached: node.height,
            computed,
        });
    }
    if (left_height - right_height).abs() > 1 {
        return Err(InvariantError::Balance {
            depth,
            left: left_height,
            right: right_height,
        });
    }

    let key = node.entry.key();
    let mut bounds = (&node.entry, &node.entry);
    if let Some((left_min, left_max)) = left_bounds {
        if dict.compare(left_max.key(), key) != Ordering::Less {
            return Err(InvariantError::Ordering { depth });
        }
        bounds.0 = left_min;
    }
    if let Some((right_min, right_max)) = right_bounds {
        if dict.compare(key, right_min.key()) != Ordering::Less {
            return Err(InvariantError::Ordering { depth });
        }
        bounds.1 = right_max;
    }

    Ok((computed, Some(bounds)))
}

/// Verifies the ordering, balance and cached height of every node in the tree.
pub fn check_invariants<E, D>(dict: &D, tree: &Tree<E>) -> Result<()>
where
    E: Entry,
    D: OrdDict<E::Key>,
{
    check_subtree(dict, tree, 0).map(|_| ()).map_err(|err| {
        debug!("avl tree invariant violated: {}", err);
        err
    })
}

/// Calls `f` on every entry in ascending order.
pub fn for_each<E, F>(tree: &Tree<E>, f: &mut F)
where
    F: FnMut(&E),
{
    if let Some(node) = tree {
        for_each(&node.left, f);
        f(&node.entry);
        for_each(&node.right, f);
    }
}

/// Returns the entries of the tree in ascending order.
pub fn to_vec<E>(tree: &Tree<E>) -> Vec<&E> {
    iter(tree).collect()
}

pub fn iter<E>(tree: &Tree<E>) -> Iter<'_, E> {
    Iter {
        current: tree,
        stack: Vec::new(),
    }
}

pub fn into_iter<E>(tree: Tree<E>) -> IntoIter<E> {
    IntoIter {
        current: tree,
        stack: Vec::new(),
    }
}

pub(crate) fn iter_mut<E>(tree: &mut Tree<E>) -> IterMut<'_, E> {
    IterMut {
        current: tree.as_mut().map(|node| &mut **node),
        stack: Vec::new(),
    }
}

/// An in-order iterator over the entries of a tree.
pub struct Iter<'a, E> {
    current: &'a Tree<E>,
    stack: Vec<&'a Node<E>>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            &node.entry
        })
    }
}

/// An in-order iterator that consumes a tree.
pub struct IntoIter<E> {
    current: Tree<E>,
    stack: Vec<Box<Node<E>>>,
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let Node { entry, right, .. } = *node;
            self.current = right;
            entry
        })
    }
}

pub(crate) struct IterMut<'a, E> {
    current: Option<&'a mut Node<E>>,
    stack: Vec<(&'a mut E, Option<&'a mut Node<E>>)>,
}

impl<'a, E> Iterator for IterMut<'a, E> {
    type Item = &'a mut E;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current.take() {
            let Node {
                entry, left, right, ..
            } = node;
            self.current = left.as_mut().map(|node| &mut **node);
            self.stack.push((entry, right.as_mut().map(|node| &mut **node)));
        }
        let IterMut { current, stack } = self;
        stack.pop().map(|(entry, right)| {
            *current = right;
            entry
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{MapEntry, SetEntry};
    use crate::ord::{NaturalOrd, ReverseOrd};

    fn from_keys(keys: &[u32]) -> Tree<SetEntry<u32>> {
        let mut tree = None;
        for key in keys {
            insert(&NaturalOrd, SetEntry(*key), &mut tree);
            assert_eq!(check_invariants(&NaturalOrd, &tree), Ok(()));
        }
        tree
    }

    fn keys(tree: &Tree<SetEntry<u32>>) -> Vec<u32> {
        iter(tree).map(|entry| entry.0).collect()
    }

    fn leaf(key: u32) -> Tree<SetEntry<u32>> {
        Some(Box::new(Node::new(SetEntry(key))))
    }

    #[test]
    fn test_height_empty() {
        let tree: Tree<SetEntry<u32>> = None;
        assert_eq!(height(&tree), -1);
        assert_eq!(height(&leaf(1)), 0);
    }

    #[test]
    fn test_insert_lookup_lt_remove() {
        let mut tree = None;
        for key in &[5u32, 3, 8, 1, 4, 7, 9] {
            assert!(insert(&NaturalOrd, MapEntry { key: *key, value: *key }, &mut tree).is_none());
        }

        assert_eq!(
            iter(&tree).map(|entry| entry.key).collect::<Vec<u32>>(),
            vec![1, 3, 4, 5, 7, 8, 9],
        );
        assert_eq!(lookup_lt(&NaturalOrd, &6, &tree).map(|entry| entry.value), Some(5));

        assert_eq!(
            remove(&NaturalOrd, &5, &mut tree),
            Some(MapEntry { key: 5, value: 5 }),
        );
        assert_eq!(lookup(&NaturalOrd, &5, &tree), None);
        assert_eq!(lookup_lt(&NaturalOrd, &6, &tree).map(|entry| entry.value), Some(4));
        assert_eq!(check_invariants(&NaturalOrd, &tree), Ok(()));
    }

    #[test]
    fn test_insert_replace() {
        let mut tree = None;
        insert(&NaturalOrd, MapEntry { key: 1, value: 1 }, &mut tree);
        assert_eq!(
            insert(&NaturalOrd, MapEntry { key: 1, value: 2 }, &mut tree),
            Some(MapEntry { key: 1, value: 1 }),
        );
        assert_eq!(lookup(&NaturalOrd, &1, &tree).map(|entry| entry.value), Some(2));
        assert_eq!(height(&tree), 0);
    }

    #[test]
    fn test_single_rotation() {
        let tree = from_keys(&[3, 2, 1]);
        assert_eq!(tree.as_ref().map(|node| node.entry.0), Some(2));
        assert_eq!(height(&tree), 1);

        let tree = from_keys(&[1, 2, 3]);
        assert_eq!(tree.as_ref().map(|node| node.entry.0), Some(2));
        assert_eq!(height(&tree), 1);
    }

    #[test]
    fn test_double_rotation() {
        let tree = from_keys(&[3, 1, 2]);
        assert_eq!(tree.as_ref().map(|node| node.entry.0), Some(2));
        assert_eq!(height(&tree), 1);

        let tree = from_keys(&[1, 3, 2]);
        assert_eq!(tree.as_ref().map(|node| node.entry.0), Some(2));
        assert_eq!(height(&tree), 1);
    }

    #[test]
    fn test_ascending_insert_height() {
        let tree = from_keys(&(0..1023).collect::<Vec<u32>>());
        assert_eq!(height(&tree), 9);
        assert_eq!(keys(&tree), (0..1023).collect::<Vec<u32>>());
    }

    #[test]
    fn test_lookup_lt() {
        let tree = from_keys(&[10, 20, 30, 40, 50]);
        assert_eq!(lookup_lt(&NaturalOrd, &10, &tree), None);
        assert_eq!(lookup_lt(&NaturalOrd, &5, &tree), None);
        assert_eq!(lookup_lt(&NaturalOrd, &11, &tree), Some(&SetEntry(10)));
        assert_eq!(lookup_lt(&NaturalOrd, &40, &tree), Some(&SetEntry(30)));
        assert_eq!(lookup_lt(&NaturalOrd, &20, &tree), Some(&SetEntry(10)));
        assert_eq!(lookup_lt(&NaturalOrd, &100, &tree), Some(&SetEntry(50)));

        let empty: Tree<SetEntry<u32>> = None;
        assert_eq!(lookup_lt(&NaturalOrd, &1, &empty), None);
    }

    #[test]
    fn test_lookup_lt_reversed() {
        let dict = ReverseOrd(NaturalOrd);
        let mut tree = None;
        for key in 0..10u32 {
            insert(&dict, SetEntry(key), &mut tree);
        }
        assert_eq!(check_invariants(&dict, &tree), Ok(()));
        assert_eq!(lookup_lt(&dict, &4, &tree), Some(&SetEntry(5)));
        assert_eq!(lookup_lt(&dict, &9, &tree), None);
        assert_eq!(min(&tree), Some(&SetEntry(9)));
        assert_eq!(max(&tree), Some(&SetEntry(0)));
    }

    #[test]
    fn test_lookup_mut() {
        let mut tree = None;
        insert(&NaturalOrd, MapEntry { key: 1, value: 1 }, &mut tree);
        insert(&NaturalOrd, MapEntry { key: 2, value: 2 }, &mut tree);
        if let Some(entry) = lookup_mut(&NaturalOrd, &2, &mut tree) {
            entry.value = 5;
        }
        assert_eq!(lookup(&NaturalOrd, &2, &tree).map(|entry| entry.value), Some(5));
        assert!(lookup_mut(&NaturalOrd, &3, &mut tree).is_none());
    }

    #[test]
    fn test_min_max() {
        let tree = from_keys(&[4, 2, 6, 1, 3]);
        assert_eq!(min(&tree), Some(&SetEntry(1)));
        assert_eq!(max(&tree), Some(&SetEntry(6)));

        let empty: Tree<SetEntry<u32>> = None;
        assert_eq!(min(&empty), None);
        assert_eq!(max(&empty), None);
    }

    #[test]
    fn test_remove_two_children() {
        let mut tree = from_keys(&(1..16).collect::<Vec<u32>>());
        let root = tree.as_ref().map(|node| node.entry.0);
        assert_eq!(root, Some(8));

        assert_eq!(remove(&NaturalOrd, &8, &mut tree), Some(SetEntry(8)));
        assert_eq!(tree.as_ref().map(|node| node.entry.0), Some(9));
        assert_eq!(check_invariants(&NaturalOrd, &tree), Ok(()));
        assert_eq!(
            keys(&tree),
            vec![1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15],
        );
    }

    #[test]
    fn test_remove_all() {
        let mut tree = from_keys(&(0..200).collect::<Vec<u32>>());
        for key in (0..200).rev().step_by(3).chain(0..200) {
            remove(&NaturalOrd, &key, &mut tree);
            assert_eq!(check_invariants(&NaturalOrd, &tree), Ok(()));
            assert_eq!(lookup(&NaturalOrd, &key, &tree), None);
        }
        assert!(tree.is_none());
    }

    #[test]
    fn test_remove_absent() {
        let mut tree = from_keys(&[2, 4, 6, 8, 10]);
        let expected = tree.clone();
        assert_eq!(remove(&NaturalOrd, &5, &mut tree), None);
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_alter_absent() {
        let mut tree = from_keys(&[1, 3]);
        let expected = tree.clone();
        let ret = alter(&NaturalOrd, 2u32, &mut tree, |probe, existing| {
            assert_eq!(probe, 2);
            assert!(existing.is_none());
            None
        });
        assert_eq!(ret, None);
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_alter_insert_update_delete() {
        let mut tree: Tree<MapEntry<u32, u32>> = None;
        for key in 0..10 {
            let ret = alter(&NaturalOrd, key, &mut tree, |key, existing| {
                assert!(existing.is_none());
                Some(MapEntry { key, value: 0 })
            });
            assert_eq!(ret, None);
            assert_eq!(check_invariants(&NaturalOrd, &tree), Ok(()));
        }

        let ret = alter(&NaturalOrd, 4, &mut tree, |key, existing| {
            existing.map(|entry| MapEntry {
                key,
                value: entry.value + 1,
            })
        });
        assert_eq!(ret, Some(MapEntry { key: 4, value: 0 }));
        assert_eq!(lookup(&NaturalOrd, &4, &tree).map(|entry| entry.value), Some(1));

        for key in 0..10u32 {
            let ret = alter(&NaturalOrd, &key, &mut tree, |_, _| None);
            assert_eq!(ret.map(|entry| entry.key), Some(key));
            assert_eq!(check_invariants(&NaturalOrd, &tree), Ok(()));
        }
        assert!(tree.is_none());
    }

    #[test]
    fn test_split_present() {
        for pivot in 0..64u32 {
            let tree = from_keys(&(0..64).collect::<Vec<u32>>());
            let (less, found, greater) = split(&NaturalOrd, &pivot, tree);

            assert_eq!(check_invariants(&NaturalOrd, &less), Ok(()));
            assert_eq!(check_invariants(&NaturalOrd, &greater), Ok(()));
            assert_eq!(found, Some(SetEntry(pivot)));
            assert_eq!(keys(&less), (0..pivot).collect::<Vec<u32>>());
            assert_eq!(keys(&greater), (pivot + 1..64).collect::<Vec<u32>>());

            let joined = join(&NaturalOrd, SetEntry(pivot), less, greater);
            assert_eq!(check_invariants(&NaturalOrd, &joined), Ok(()));
            assert_eq!(keys(&joined), (0..64).collect::<Vec<u32>>());
        }
    }

    #[test]
    fn test_split_absent() {
        let tree = from_keys(&(0..50).map(|key| key * 2).collect::<Vec<u32>>());
        let (less, found, greater) = split(&NaturalOrd, &31, tree);
        assert_eq!(found, None);
        assert_eq!(check_invariants(&NaturalOrd, &less), Ok(()));
        assert_eq!(check_invariants(&NaturalOrd, &greater), Ok(()));
        assert_eq!(keys(&less), (0..16).map(|key| key * 2).collect::<Vec<u32>>());
        assert_eq!(keys(&greater), (16..50).map(|key| key * 2).collect::<Vec<u32>>());

        let (less, found, greater) = split(&NaturalOrd, &1, None::<Box<Node<SetEntry<u32>>>>);
        assert!(less.is_none() && found.is_none() && greater.is_none());
    }

    #[test]
    fn test_join_uneven() {
        let left = from_keys(&(0..1000).collect::<Vec<u32>>());
        let joined = join(&NaturalOrd, SetEntry(1000), left, leaf(1001));
        assert_eq!(check_invariants(&NaturalOrd, &joined), Ok(()));
        assert_eq!(keys(&joined), (0..1002).collect::<Vec<u32>>());

        let right = from_keys(&(10..1000).collect::<Vec<u32>>());
        let left = from_keys(&[0, 1, 2, 3]);
        let joined = join(&NaturalOrd, SetEntry(5), left, right);
        assert_eq!(check_invariants(&NaturalOrd, &joined), Ok(()));
        assert_eq!(
            keys(&joined),
            [0, 1, 2, 3, 5].iter().cloned().chain(10..1000).collect::<Vec<u32>>(),
        );
    }

    #[test]
    fn test_join_empty() {
        let joined = join(&NaturalOrd, SetEntry(0), None, from_keys(&[1, 2, 3]));
        assert_eq!(check_invariants(&NaturalOrd, &joined), Ok(()));
        assert_eq!(keys(&joined), vec![0, 1, 2, 3]);

        let joined = join(&NaturalOrd, SetEntry(4), from_keys(&[1, 2, 3]), None);
        assert_eq!(keys(&joined), vec![1, 2, 3, 4]);

        let joined = join(&NaturalOrd, SetEntry(4), None, None);
        assert_eq!(keys(&joined), vec![4]);
        assert_eq!(height(&joined), 0);
    }

    #[test]
    fn test_check_height_cache() {
        let mut tree = from_keys(&[2, 1, 3]);
        if let Some(node) = tree.as_mut() {
            node.height = 3;
        }
        assert_eq!(
            check_invariants(&NaturalOrd, &tree),
            Err(InvariantError::Height {
                depth: 0,
                cached: 3,
                computed: 1,
            }),
        );
    }

    #[test]
    fn test_check_balance() {
        let mut node = Node::new(SetEntry(3));
        node.left = Some(Box::new(Node::with_children(SetEntry(2), leaf(1), None)));
        node.update();
        let tree = Some(Box::new(node));
        assert_eq!(
            check_invariants(&NaturalOrd, &tree),
            Err(InvariantError::Balance {
                depth: 0,
                left: 1,
                right: -1,
            }),
        );
    }

    #[test]
    fn test_check_ordering() {
        // 4 sits in the left subtree of 3
        let left = Some(Box::new(Node::with_children(SetEntry(1), None, leaf(4))));
        let tree = Some(Box::new(Node::with_children(SetEntry(3), left, leaf(5))));
        assert_eq!(
            check_invariants(&NaturalOrd, &tree),
            Err(InvariantError::Ordering { depth: 0 }),
        );

        let tree = Some(Box::new(Node::with_children(SetEntry(3), leaf(3), None)));
        assert_eq!(
            check_invariants(&NaturalOrd, &tree),
            Err(InvariantError::Ordering { depth: 0 }),
        );
    }

    #[test]
    fn test_iterators() {
        let mut tree = from_keys(&[5, 1, 4, 2, 3]);
        assert_eq!(
            to_vec(&tree),
            vec![&SetEntry(1), &SetEntry(2), &SetEntry(3), &SetEntry(4), &SetEntry(5)],
        );

        let mut visited = Vec::new();
        for_each(&tree, &mut |entry: &SetEntry<u32>| visited.push(entry.0));
        assert_eq!(visited, vec![1, 2, 3, 4, 5]);

        for entry in iter_mut(&mut tree) {
            entry.0 *= 10;
        }
        assert_eq!(keys(&tree), vec![10, 20, 30, 40, 50]);

        assert_eq!(
            into_iter(tree).map(|entry| entry.0).collect::<Vec<u32>>(),
            vec![10, 20, 30, 40, 50],
        );
    }
}
