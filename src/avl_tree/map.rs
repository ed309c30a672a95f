use crate::avl_tree::tree;
use crate::entry::MapEntry;
use crate::error::{InvariantError, Result};
use crate::ord::{NaturalOrd, OrdDict};
use std::iter::FromIterator;
use std::ops::Index;

/// An ordered map implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Keys are ordered by the
/// dictionary `D` rather than by their own `Ord` implementation; `NaturalOrd` is used when no
/// dictionary is given.
///
/// # Examples
///
/// ```
/// use dict_collections::avl_tree::AvlMap;
///
/// let mut map = AvlMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.lookup_lt(&3), Some((&0, &1)));
///
/// assert_eq!(map.remove(&0), Some((0, 1)));
/// assert_eq!(map.remove(&1), None);
/// ```
#[derive(Clone, Debug)]
pub struct AvlMap<T, U, D = NaturalOrd> {
    tree: tree::Tree<MapEntry<T, U>>,
    dict: D,
    len: usize,
}

impl<T, U> AvlMap<T, U> {
    /// Constructs a new, empty `AvlMap<T, U>` ordered by the keys' own `Ord` implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_dict(NaturalOrd)
    }
}

impl<T, U, D> AvlMap<T, U, D> {
    /// Constructs a new, empty `AvlMap<T, U, D>` ordered by `dict`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    /// use dict_collections::ord;
    ///
    /// let mut map = AvlMap::with_dict(ord::from_fn(|l: &String, r: &String| l.len().cmp(&r.len())));
    /// map.insert(String::from("ab"), 1);
    /// map.insert(String::from("cd"), 2);
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&String::from("xy")), Some(&2));
    /// ```
    pub fn with_dict(dict: D) -> Self {
        AvlMap {
            tree: None,
            dict,
            len: 0,
        }
    }

    /// Returns the dictionary ordering the map.
    pub fn dict(&self) -> &D {
        &self.dict
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree).map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree).map(|entry| &entry.key)
    }

    /// Returns the key-value pairs of the map in ascending order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    /// assert_eq!(map.to_vec(), vec![(&1, &'a'), (&2, &'b')]);
    /// ```
    pub fn to_vec(&self) -> Vec<(&T, &U)> {
        self.iter().collect()
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlMapIter<'_, T, U> {
        AvlMapIter {
            tree_iter: tree::iter(&self.tree),
        }
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (key, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> AvlMapIterMut<'_, T, U> {
        AvlMapIterMut {
            tree_iter: tree::iter_mut(&mut self.tree),
        }
    }
}

impl<T, U, D> AvlMap<T, U, D>
where
    D: OrdDict<T>,
{
    #[cfg(feature = "consistency_check")]
    fn assert_consistent(&self) {
        if let Err(err) = self.check_invariants() {
            log::error!("avl map is inconsistent: {}", err);
            panic!("avl map is inconsistent: {}", err);
        }
    }

    #[cfg(not(feature = "consistency_check"))]
    fn assert_consistent(&self) {}

    /// Inserts a key-value pair into the map. If the key already exists in the map, it will return
    /// and replace the old key-value pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)> {
        let ret = tree::insert(&self.dict, MapEntry { key, value }, &mut self.tree);
        if ret.is_none() {
            self.len += 1;
        }
        self.assert_consistent();
        ret.map(|MapEntry { key, value }| (key, value))
    }

    /// Updates the value stored under a key. `f` receives the current value, if any, and returns
    /// the new value, or `None` to remove the key. Returns the key-value pair that was replaced or
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, u32> = AvlMap::new();
    /// map.alter("a", |value| Some(value.map_or(1, |count| count + 1)));
    /// map.alter("a", |value| Some(value.map_or(1, |count| count + 1)));
    /// assert_eq!(map.get(&"a"), Some(&2));
    ///
    /// assert_eq!(map.alter("a", |_| None), Some(("a", 2)));
    /// assert!(map.is_empty());
    /// ```
    pub fn alter<F>(&mut self, key: T, f: F) -> Option<(T, U)>
    where
        F: FnOnce(Option<&U>) -> Option<U>,
    {
        let AvlMap {
            ref mut tree,
            ref dict,
            ref mut len,
        } = self;
        let ret = tree::alter(dict, key, tree, |key, entry| {
            let existed = entry.is_some();
            let ret = f(entry.map(|entry| &entry.value)).map(|value| MapEntry { key, value });
            match (existed, ret.is_some()) {
                (false, true) => *len += 1,
                (true, false) => *len -= 1,
                _ => {},
            }
            ret
        });
        self.assert_consistent();
        ret.map(|MapEntry { key, value }| (key, value))
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<(T, U)> {
        let ret = tree::remove(&self.dict, key, &mut self.tree);
        if ret.is_some() {
            self.len -= 1;
        }
        self.assert_consistent();
        ret.map(|MapEntry { key, value }| (key, value))
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &T) -> bool {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &T) -> Option<&U> {
        tree::lookup(&self.dict, key, &self.tree).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &T) -> Option<&mut U> {
        tree::lookup_mut(&self.dict, key, &mut self.tree).map(|entry| &mut entry.value)
    }

    /// Returns the key-value pair with the greatest key that is strictly less than a particular
    /// key. Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 'a');
    /// map.insert(3, 'c');
    /// assert_eq!(map.lookup_lt(&1), None);
    /// assert_eq!(map.lookup_lt(&3), Some((&1, &'a')));
    /// assert_eq!(map.lookup_lt(&4), Some((&3, &'c')));
    /// ```
    pub fn lookup_lt(&self, key: &T) -> Option<(&T, &U)> {
        tree::lookup_lt(&self.dict, key, &self.tree).map(|entry| (&entry.key, &entry.value))
    }

    /// Splits the map into the pairs whose keys are less than `key`, the pair whose key equals
    /// `key`, and the pairs whose keys are greater than `key`. The lesser half is walked once to
    /// recount both lengths.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// for key in 0..5 {
    ///     map.insert(key, key * 10);
    /// }
    ///
    /// let (less, found, greater) = map.split(&2);
    /// assert_eq!(less.to_vec(), vec![(&0, &0), (&1, &10)]);
    /// assert_eq!(found, Some((2, 20)));
    /// assert_eq!(greater.to_vec(), vec![(&3, &30), (&4, &40)]);
    /// ```
    pub fn split(self, key: &T) -> (Self, Option<(T, U)>, Self)
    where
        D: Clone,
    {
        let AvlMap { tree, dict, len } = self;
        let (less, found, greater) = tree::split(&dict, key, tree);
        let less_len = tree::iter(&less).count();
        let greater_len = len - less_len - if found.is_some() { 1 } else { 0 };
        let less = AvlMap {
            tree: less,
            dict: dict.clone(),
            len: less_len,
        };
        let greater = AvlMap {
            tree: greater,
            dict,
            len: greater_len,
        };
        less.assert_consistent();
        greater.assert_consistent();
        (less, found.map(|MapEntry { key, value }| (key, value)), greater)
    }

    /// Verifies the invariants of the underlying avl tree and that the cached length matches the
    /// number of pairs in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.check_invariants(), Ok(()));
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

impl<T, U, D> IntoIterator for AvlMap<T, U, D> {
    type IntoIter = AvlMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: tree::into_iter(self.tree),
        }
    }
}

impl<'a, T, U, D> IntoIterator for &'a AvlMap<T, U, D>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = AvlMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U, D> IntoIterator for &'a mut AvlMap<T, U, D>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = AvlMapIterMut<'a, T, U>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `AvlMap<T, U, D>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct AvlMapIntoIter<T, U> {
    tree_iter: tree::IntoIter<MapEntry<T, U>>,
}

impl<T, U> Iterator for AvlMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter
            .next()
            .map(|MapEntry { key, value }| (key, value))
    }
}

/// An iterator for `AvlMap<T, U, D>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct AvlMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    tree_iter: tree::Iter<'a, MapEntry<T, U>>,
}

impl<'a, T, U> Iterator for AvlMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| (&entry.key, &entry.value))
    }
}

/// A mutable iterator for `AvlMap<T, U, D>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references to the
/// values.
pub struct AvlMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    tree_iter: tree::IterMut<'a, MapEntry<T, U>>,
}

impl<'a, T, U> Iterator for AvlMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| {
            let MapEntry { key, value } = entry;
            (&*key, value)
        })
    }
}

impl<T, U, D> Default for AvlMap<T, U, D>
where
    D: Default,
{
    fn default() -> Self {
        Self::with_dict(D::default())
    }
}

impl<T, U, D> Extend<(T, U)> for AvlMap<T, U, D>
where
    D: OrdDict<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, U)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T, U> FromIterator<(T, U)> for AvlMap<T, U>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = AvlMap::new();
        map.extend(iter);
        map
    }
}

impl<'a, T, U, D> Index<&'a T> for AvlMap<T, U, D>
where
    D: OrdDict<T>,
{
    type Output = U;

    fn index(&self, key: &'a T) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}
