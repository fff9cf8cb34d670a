//! Convenience backstack operations
//!
//! Every operation reads the current backstack, builds a replacement and
//! publishes it through [`Navigator::set_backstack`]. Operations that find
//! nothing to do return `false` and publish nothing, so the current snapshot
//! stays the same allocation.

use crate::backstack::BackstackEntry;
use crate::key::NavigationKey;
use crate::types::{EntryId, KeyType};

use super::navigator::Navigator;

impl<K: NavigationKey> Navigator<K> {
    /// Push a fresh entry for `key`
    pub fn push(&mut self, key: K) {
        self.push_all([key]);
    }

    /// Push fresh entries for every key, in order
    pub fn push_all(&mut self, keys: impl IntoIterator<Item = K>) {
        let mut entries = self.backstack.to_vec();
        let before = entries.len();
        entries.extend(keys.into_iter().map(BackstackEntry::new));
        if entries.len() != before {
            self.set_backstack(entries);
        }
    }

    /// Replace the current entry with a fresh entry for `key`
    ///
    /// On an empty backstack this is a push.
    pub fn replace(&mut self, key: K) {
        let mut entries = self.backstack.to_vec();
        entries.pop();
        entries.push(BackstackEntry::new(key));
        self.set_backstack(entries);
    }

    /// Remove entries from the top down to the last entry matching
    /// `predicate` (and that entry too when `inclusive`), then push `key`
    ///
    /// Returns false without changes if nothing matches.
    pub fn replace_to(
        &mut self,
        predicate: impl Fn(&K) -> bool,
        key: K,
        inclusive: bool,
    ) -> bool {
        let Some(index) = self.rposition(predicate) else {
            return false;
        };
        let mut entries = self.backstack.to_vec();
        entries.truncate(if inclusive { index } else { index + 1 });
        entries.push(BackstackEntry::new(key));
        self.set_backstack(entries);
        true
    }

    /// [`Navigator::replace_to`] matching on key type
    pub fn replace_to_type(&mut self, key_type: KeyType, key: K, inclusive: bool) -> bool {
        self.replace_to(|k| k.key_type() == key_type, key, inclusive)
    }

    /// Move an existing entry matching `predicate` to the top
    ///
    /// Searches from the top when `from_top`, otherwise from the root. Returns
    /// false if nothing matches; an entry already on top is left in place.
    pub fn move_to_top(&mut self, predicate: impl Fn(&K) -> bool, from_top: bool) -> bool {
        let found = if from_top {
            self.rposition(predicate)
        } else {
            self.backstack.iter().position(|entry| predicate(entry.key()))
        };
        let Some(index) = found else {
            return false;
        };
        if index + 1 == self.backstack.len() {
            return true;
        }
        let mut entries = self.backstack.to_vec();
        let entry = entries.remove(index);
        entries.push(entry);
        self.set_backstack(entries);
        true
    }

    /// Keep at most one entry of `key`'s type, on top
    ///
    /// All entries of the type are removed. With `reuse_existing`, the most
    /// recent of them (id included) goes back on top; otherwise, or if there
    /// was none, a fresh entry for `key` does.
    pub fn single_instance(&mut self, key: K, reuse_existing: bool) {
        let key_type = key.key_type();
        let mut entries = self.backstack.to_vec();
        let existing = entries
            .iter()
            .rposition(|entry| entry.key().key_type() == key_type)
            .map(|index| entries[index].clone());
        entries.retain(|entry| entry.key().key_type() != key_type);

        let top = match existing {
            Some(entry) if reuse_existing => entry,
            _ => BackstackEntry::new(key),
        };
        entries.push(top);
        self.set_backstack(entries);
    }

    /// Push `key` unless the current entry is already of its type
    pub fn single_top(&mut self, key: K) -> bool {
        let key_type = key.key_type();
        if self
            .backstack
            .current()
            .is_some_and(|current| current.key().key_type() == key_type)
        {
            return false;
        }
        self.push(key);
        true
    }

    /// Pop entries above the last entry matching `predicate` (and that entry
    /// too when `inclusive`)
    ///
    /// Returns false without changes if nothing matches.
    pub fn pop_to(&mut self, predicate: impl Fn(&K) -> bool, inclusive: bool) -> bool {
        let Some(index) = self.rposition(predicate) else {
            return false;
        };
        let keep = if inclusive { index } else { index + 1 };
        if keep == self.backstack.len() {
            return true;
        }
        let mut entries = self.backstack.to_vec();
        entries.truncate(keep);
        self.set_backstack(entries);
        true
    }

    /// [`Navigator::pop_to`] matching on key type
    pub fn pop_to_type(&mut self, key_type: KeyType, inclusive: bool) -> bool {
        self.pop_to(|k| k.key_type() == key_type, inclusive)
    }

    /// Remove every entry matching `predicate`
    ///
    /// Returns true if anything was removed.
    pub fn remove_all(&mut self, predicate: impl Fn(&K) -> bool) -> bool {
        let mut entries = self.backstack.to_vec();
        entries.retain(|entry| !predicate(entry.key()));
        if entries.len() == self.backstack.len() {
            return false;
        }
        self.set_backstack(entries);
        true
    }

    /// Remove the entry with the given id, wherever it is
    pub fn remove_entry(&mut self, id: &EntryId) -> bool {
        let Some(index) = self.backstack.position_of(id) else {
            return false;
        };
        let mut entries = self.backstack.to_vec();
        entries.remove(index);
        self.set_backstack(entries);
        true
    }

    /// Collapse to the root entry
    pub fn pop_to_root(&mut self) -> bool {
        if self.backstack.len() <= 1 {
            return false;
        }
        let root = self.backstack[0].clone();
        self.set_backstack(vec![root]);
        true
    }

    /// Collapse to a single fresh entry for `key`
    pub fn set_root(&mut self, key: K) {
        self.set_backstack(vec![BackstackEntry::new(key)]);
    }

    /// Pop the current entry
    ///
    /// Returns false, leaving the backstack untouched, when only one entry is
    /// left.
    pub fn pop(&mut self) -> bool {
        if self.backstack.len() <= 1 {
            return false;
        }
        let mut entries = self.backstack.to_vec();
        entries.pop();
        self.set_backstack(entries);
        true
    }

    /// Whether a back press should be handled by this navigator
    pub fn can_go_back(&self) -> bool {
        self.backstack.len() > 1 && !self.override_back_press
    }

    /// Handle a back press
    pub fn handle_back(&mut self) -> bool {
        self.can_go_back() && self.pop()
    }

    fn rposition(&self, predicate: impl Fn(&K) -> bool) -> Option<usize> {
        self.backstack
            .iter()
            .rposition(|entry| predicate(entry.key()))
    }
}
