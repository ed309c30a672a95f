use crate::avl_tree::tree;
use crate::entry::SetEntry;
use crate::error::{InvariantError, Result};
use crate::ord::{NaturalOrd, OrdDict};
use std::iter::FromIterator;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. The set keeps a running count
/// of its elements.
///
/// # Examples
///
/// ```
/// use dict_collections::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.lookup_lt(&2), Some(&0));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Clone, Debug)]
pub struct AvlSet<T, D = NaturalOrd> {
    tree: tree::Tree<SetEntry<T>>,
    dict: D,
    len: usize,
}

impl<T> AvlSet<T> {
    /// Constructs a new, empty `AvlSet<T>` ordered by the keys' own `Ord` implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_dict(NaturalOrd)
    }
}

impl<T, D> AvlSet<T, D> {
    /// Constructs a new, empty `AvlSet<T, D>` ordered by `dict`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    /// use dict_collections::ord::{NaturalOrd, ReverseOrd};
    ///
    /// let mut set = AvlSet::with_dict(ReverseOrd(NaturalOrd));
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.min(), Some(&2));
    /// ```
    pub fn with_dict(dict: D) -> Self {
        AvlSet {
            tree: None,
            dict,
            len: 0,
        }
    }

    /// Returns the dictionary ordering the set.
    pub fn dict(&self) -> &D {
        &self.dict
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree).map(|entry| &entry.0)
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree).map(|entry| &entry.0)
    }

    /// Returns the keys of the set in ascending order.
    pub fn to_vec(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<'_, T> {
        AvlSetIter {
            tree_iter: tree::iter(&self.tree),
        }
    }
}

impl<T, D> AvlSet<T, D>
where
    D: OrdDict<T>,
{
    #[cfg(feature = "consistency_check")]
    fn assert_consistent(&self) {
        if let Err(err) = self.check_invariants() {
            log::error!("avl set is inconsistent: {}", err);
            panic!("avl set is inconsistent: {}", err);
        }
    }

    #[cfg(not(feature = "consistency_check"))]
    fn assert_consistent(&self) {}

    /// Inserts a key into the set. If the key already exists in the set, it will return and
    /// replace the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.insert(1), None);
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Some(1));
    /// ```
    pub fn insert(&mut self, key: T) -> Option<T> {
        let AvlSet {
            ref mut tree,
            ref dict,
            ref mut len,
        } = self;
        let ret = tree::alter(dict, key, tree, |key, entry| {
            if entry.is_none() {
                *len += 1;
            }
            Some(SetEntry(key))
        });
        self.assert_consistent();
        ret.map(|entry| entry.0)
    }

    /// Removes a key from the set. If the key exists in the set, it will return the associated
    /// key. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let AvlSet {
            ref mut tree,
            ref dict,
            ref mut len,
        } = self;
        let ret = tree::alter(dict, key, tree, |_, entry| {
            if entry.is_some() {
                *len -= 1;
            }
            None
        });
        self.assert_consistent();
        ret.map(|entry| entry.0)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        tree::lookup(&self.dict, key, &self.tree).is_some()
    }

    /// Returns the greatest key in the set that is strictly less than a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.lookup_lt(&1), None);
    /// assert_eq!(set.lookup_lt(&2), Some(&1));
    /// ```
    pub fn lookup_lt(&self, key: &T) -> Option<&T> {
        tree::lookup_lt(&self.dict, key, &self.tree).map(|entry| &entry.0)
    }

    /// Verifies the invariants of the underlying avl tree and that the cached length matches the
    /// number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<()> {
        tree::check_invariants(&self.dict, &self.tree)?;
        let actual = tree::iter(&self.tree).count();
        if actual != self.len {
            return Err(InvariantError::Length {
                cached: self.len,
                actual,
            });
        }
        Ok(())
    }
}

impl<T, D> IntoIterator for AvlSet<T, D> {
    type Item = T;
    type IntoIter = AvlSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: tree::into_iter(self.tree),
        }
    }
}

impl<'a, T, D> IntoIterator for &'a AvlSet<T, D>
where
    T: 'a,
{
    type Item = &'a T;
    type IntoIter = AvlSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T, D>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct AvlSetIntoIter<T> {
    tree_iter: tree::IntoIter<SetEntry<T>>,
}

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| entry.0)
    }
}

/// An iterator for `AvlSet<T, D>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct AvlSetIter<'a, T>
where
    T: 'a,
{
    tree_iter: tree::Iter<'a, SetEntry<T>>,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| &entry.0)
    }
}

impl<T, D> Default for AvlSet<T, D>
where
    D: Default,
{
    fn default() -> Self {
        Self::with_dict(D::default())
    }
}

impl<T, D> Extend<T> for AvlSet<T, D>
where
    D: OrdDict<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}
