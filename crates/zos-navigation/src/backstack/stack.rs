//! Immutable backstack snapshots

use std::ops::Deref;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::entry::BackstackEntry;
use crate::key::NavigationKey;
use crate::types::EntryId;

/// A published, immutable backstack
///
/// Cloning is cheap and shares the underlying entries, so observers can hold
/// on to the snapshot they rendered while the navigator publishes a new one.
/// [`Backstack::ptr_eq`] tells whether two snapshots are the very same
/// publication rather than merely equal.
#[derive(Debug)]
pub struct Backstack<K> {
    entries: Rc<[BackstackEntry<K>]>,
}

impl<K> Clone for Backstack<K> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<K> Default for Backstack<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K> Backstack<K> {
    /// An empty backstack
    pub fn empty() -> Self {
        Self {
            entries: Rc::from(Vec::new()),
        }
    }

    /// Whether both snapshots share the same allocation
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.entries, &b.entries)
    }

    /// The current (topmost) entry
    pub fn current(&self) -> Option<&BackstackEntry<K>> {
        self.entries.last()
    }

    /// Whether an entry with the given id is part of this snapshot
    pub fn contains_id(&self, id: &EntryId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    /// Position of the entry with the given id
    pub fn position_of(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == id)
    }
}

impl<K: Clone> Backstack<K> {
    /// Copy the entries out for building a modified backstack
    pub fn to_vec(&self) -> Vec<BackstackEntry<K>> {
        self.entries.to_vec()
    }
}

impl<K: NavigationKey> Backstack<K> {
    /// Build a backstack of fresh entries from keys
    pub fn from_keys(keys: impl IntoIterator<Item = K>) -> Self {
        keys.into_iter()
            .map(BackstackEntry::new)
            .collect::<Vec<_>>()
            .into()
    }
}

impl<K> From<Vec<BackstackEntry<K>>> for Backstack<K> {
    fn from(entries: Vec<BackstackEntry<K>>) -> Self {
        Self {
            entries: Rc::from(entries),
        }
    }
}

impl<K> Deref for Backstack<K> {
    type Target = [BackstackEntry<K>];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<K: PartialEq> PartialEq for Backstack<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries[..] == other.entries[..]
    }
}

impl<K: Serialize> Serialize for Backstack<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.entries.iter())
    }
}

impl<'de, K: Deserialize<'de>> Deserialize<'de> for Backstack<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<BackstackEntry<K>>::deserialize(deserializer).map(Self::from)
    }
}
