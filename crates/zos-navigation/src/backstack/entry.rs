//! Backstack entries

use serde::{Deserialize, Serialize};

use crate::key::NavigationKey;
use crate::types::EntryId;

/// One slot of navigation history: a key paired with a unique id
///
/// The id is generated once when the entry is created and is what
/// distinguishes two pushes of an otherwise equal key. Cloning an entry keeps
/// its id, so a cloned entry still refers to the same history slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackstackEntry<K> {
    /// What to show
    pub navigation_key: K,
    /// Identity of this slot
    pub id: EntryId,
}

impl<K: NavigationKey> BackstackEntry<K> {
    /// Create an entry with a freshly generated id
    pub fn new(navigation_key: K) -> Self {
        Self {
            navigation_key,
            id: EntryId::generate(),
        }
    }

    /// Create an entry with a known id (used when restoring)
    pub fn with_id(navigation_key: K, id: EntryId) -> Self {
        Self { navigation_key, id }
    }

    /// Borrow the key
    pub fn key(&self) -> &K {
        &self.navigation_key
    }
}
