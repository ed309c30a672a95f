//! Elements stored in trees.
//!
//! A tree only ever compares the key of an element. The [`Entry`] trait exposes that key, which
//! lets a map store key-value pairs while its dictionary only knows how to compare keys.

use serde_derive::{Deserialize, Serialize};

/// An element of a tree that can be compared through its key.
pub trait Entry {
    type Key: ?Sized;

    fn key(&self) -> &Self::Key;
}

/// A key-value pair whose key alone determines its position in a tree.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MapEntry<T, U> {
    pub key: T,
    pub value: U,
}

impl<T, U> Entry for MapEntry<T, U> {
    type Key = T;

    fn key(&self) -> &T {
        &self.key
    }
}

/// A bare key.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SetEntry<T>(pub T);

impl<T> Entry for SetEntry<T> {
    type Key = T;

    fn key(&self) -> &T {
        &self.0
    }
}
