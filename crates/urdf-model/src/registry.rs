//! Name-keyed record storage.
//!
//! A [`Registry`] keeps records in insertion order and indexes them by name.
//! Links, joints and materials of a [`Model`](crate::Model) each live in one.

use indexmap::IndexMap;
use indexmap::map::{Entry, Values, ValuesMut};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Records that are keyed by their name.
pub trait Named {
    /// The unique key of this record.
    fn name(&self) -> &str;
}

/// Insertion-ordered map from name to record.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Registry<T> {
    map: IndexMap<String, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }
}

impl<T: PartialEq> PartialEq for Registry<T> {
    fn eq(&self, other: &Self) -> bool {
        // Order matters: `IndexMap` equality alone ignores it.
        self.map.len() == other.map.len() && self.map.iter().eq(other.map.iter())
    }
}

impl<T: Named> Registry<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, handing it back if the name is already taken.
    pub fn try_insert(&mut self, item: T) -> std::result::Result<(), T> {
        match self.map.entry(item.name().to_string()) {
            Entry::Occupied(_) => Err(item),
            Entry::Vacant(slot) => {
                slot.insert(item);
                Ok(())
            }
        }
    }

    /// Look up a record by name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.map.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.map.get_mut(name)
    }

    /// True if a record with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Position of a record in insertion order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.map.get_index_of(name)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> Values<'_, String, T> {
        self.map.values()
    }

    pub(crate) fn iter_mut(&mut self) -> ValuesMut<'_, String, T> {
        self.map.values_mut()
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.values()
    }
}
