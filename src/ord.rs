//! Comparator dictionaries.
//!
//! A dictionary is a value that knows how to compare keys of some type. Every tree operation
//! takes one explicitly, so the same key type can be stored under different orders and keys
//! without an `Ord` implementation can still be stored.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// Equality over `K`, supplied from outside the key type.
pub trait EqDict<K: ?Sized> {
    /// Returns `true` if `left` and `right` are equal.
    fn eq(&self, left: &K, right: &K) -> bool;

    /// Returns `true` if `left` and `right` are not equal.
    fn neq(&self, left: &K, right: &K) -> bool {
        !self.eq(left, right)
    }
}

/// A three-way comparison over `K`, supplied from outside the key type.
///
/// Implementations must be a total order over the keys they are used with and must agree with
/// their `EqDict` implementation, i.e. `eq(a, b)` exactly when `compare(a, b)` is
/// `Ordering::Equal`.
pub trait OrdDict<K: ?Sized>: EqDict<K> {
    /// Compares `left` against `right`.
    fn compare(&self, left: &K, right: &K) -> Ordering;
}

impl<'a, K, D> EqDict<K> for &'a D
where
    K: ?Sized,
    D: EqDict<K> + ?Sized,
{
    fn eq(&self, left: &K, right: &K) -> bool {
        (**self).eq(left, right)
    }

    fn neq(&self, left: &K, right: &K) -> bool {
        (**self).neq(left, right)
    }
}

impl<'a, K, D> OrdDict<K> for &'a D
where
    K: ?Sized,
    D: OrdDict<K> + ?Sized,
{
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (**self).compare(left, right)
    }
}

/// The dictionary derived from a key type's own `Ord` implementation.
///
/// # Examples
///
/// ```
/// use dict_collections::ord::{NaturalOrd, OrdDict};
/// use std::cmp::Ordering;
///
/// assert_eq!(NaturalOrd.compare(&1, &2), Ordering::Less);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrd;

impl<K> EqDict<K> for NaturalOrd
where
    K: Ord + ?Sized,
{
    fn eq(&self, left: &K, right: &K) -> bool {
        left == right
    }
}

impl<K> OrdDict<K> for NaturalOrd
where
    K: Ord + ?Sized,
{
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

/// A dictionary that reverses the order of another dictionary.
///
/// # Examples
///
/// ```
/// use dict_collections::ord::{NaturalOrd, OrdDict, ReverseOrd};
/// use std::cmp::Ordering;
///
/// assert_eq!(ReverseOrd(NaturalOrd).compare(&1, &2), Ordering::Greater);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReverseOrd<D>(pub D);

impl<K, D> EqDict<K> for ReverseOrd<D>
where
    K: ?Sized,
    D: EqDict<K>,
{
    fn eq(&self, left: &K, right: &K) -> bool {
        self.0.eq(left, right)
    }
}

impl<K, D> OrdDict<K> for ReverseOrd<D>
where
    K: ?Sized,
    D: OrdDict<K>,
{
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self.0.compare(right, left)
    }
}

/// A dictionary backed by a comparison closure. Equality is derived from the closure.
///
/// Constructed with [`from_fn`].
pub struct FnOrd<K: ?Sized, F> {
    compare: F,
    _marker: PhantomData<fn(&K, &K)>,
}

/// Creates a dictionary from a comparison closure.
///
/// # Examples
///
/// ```
/// use dict_collections::ord::{self, EqDict, OrdDict};
/// use std::cmp::Ordering;
///
/// let by_len = ord::from_fn(|l: &str, r: &str| l.len().cmp(&r.len()));
/// assert_eq!(by_len.compare("ab", "c"), Ordering::Greater);
/// assert!(by_len.eq("ab", "cd"));
/// ```
pub fn from_fn<K, F>(compare: F) -> FnOrd<K, F>
where
    K: ?Sized,
    F: Fn(&K, &K) -> Ordering,
{
    FnOrd {
        compare,
        _marker: PhantomData,
    }
}

impl<K, F> EqDict<K> for FnOrd<K, F>
where
    K: ?Sized,
    F: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, left: &K, right: &K) -> bool {
        (self.compare)(left, right) == Ordering::Equal
    }
}

impl<K, F> OrdDict<K> for FnOrd<K, F>
where
    K: ?Sized,
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (self.compare)(left, right)
    }
}

impl<K, F> Clone for FnOrd<K, F>
where
    K: ?Sized,
    F: Clone,
{
    fn clone(&self) -> Self {
        FnOrd {
            compare: self.compare.clone(),
            _marker: PhantomData,
        }
    }
}

impl<K: ?Sized, F> fmt::Debug for FnOrd<K, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("FnOrd")
    }
}
