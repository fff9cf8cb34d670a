//! Saveable UI state

use std::cell::RefCell;
use std::collections::HashMap;

use super::saved_state::Bundle;

/// Keyed storage for UI-state snapshots
pub trait SaveableStateHolder {
    /// Store the snapshot for `key`, replacing any previous one
    fn save_state(&self, key: &str, state: Bundle);

    /// The snapshot stored for `key`
    fn restore_state(&self, key: &str) -> Option<Bundle>;

    /// Forget the snapshot for `key`
    fn remove_state(&self, key: &str);
}

/// In-memory [`SaveableStateHolder`]
#[derive(Debug, Default)]
pub struct MemorySaveableStateHolder {
    states: RefCell<HashMap<String, Bundle>>,
}

impl MemorySaveableStateHolder {
    /// Create an empty holder
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a snapshot exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.states.borrow().contains_key(key)
    }
}

impl SaveableStateHolder for MemorySaveableStateHolder {
    fn save_state(&self, key: &str, state: Bundle) {
        self.states.borrow_mut().insert(key.to_string(), state);
    }

    fn restore_state(&self, key: &str) -> Option<Bundle> {
        self.states.borrow().get(key).cloned()
    }

    fn remove_state(&self, key: &str) {
        self.states.borrow_mut().remove(key);
    }
}
