//! Saved-state registry

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::NavigationResult;

/// A saved-state bundle
pub type Bundle = serde_json::Map<String, Value>;

/// Everything a registry saved, keyed by provider key
pub type SavedStateSnapshot = BTreeMap<String, Bundle>;

/// Something that can write its state into a bundle on demand
pub trait SavedStateProvider {
    /// Current state to persist
    fn save_state(&self) -> Bundle;
}

/// Registry of saved-state providers keyed by string
///
/// Registering a key that is already registered replaces the provider;
/// unregistering an unknown key does nothing.
pub trait SavedStateRegistry {
    /// Register the provider saved under `key`
    fn register_provider(&self, key: &str, provider: Rc<dyn SavedStateProvider>);

    /// Stop saving `key`
    fn unregister_provider(&self, key: &str);

    /// Take the state restored for `key`; a second call returns `None`
    fn consume_restored_state(&self, key: &str) -> Option<Bundle>;

    /// Collect the state of every registered provider
    fn perform_save(&self) -> SavedStateSnapshot;
}

/// In-memory [`SavedStateRegistry`]
#[derive(Default)]
pub struct MemorySavedStateRegistry {
    providers: RefCell<BTreeMap<String, Rc<dyn SavedStateProvider>>>,
    restored: RefCell<SavedStateSnapshot>,
}

impl MemorySavedStateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that hands out the state of a previous save
    pub fn from_snapshot(snapshot: SavedStateSnapshot) -> Self {
        Self {
            providers: RefCell::new(BTreeMap::new()),
            restored: RefCell::new(snapshot),
        }
    }

    /// Whether a provider is registered under `key`
    pub fn is_registered(&self, key: &str) -> bool {
        self.providers.borrow().contains_key(key)
    }

    /// Number of registered providers
    pub fn provider_count(&self) -> usize {
        self.providers.borrow().len()
    }
}

impl SavedStateRegistry for MemorySavedStateRegistry {
    fn register_provider(&self, key: &str, provider: Rc<dyn SavedStateProvider>) {
        self.providers.borrow_mut().insert(key.to_string(), provider);
    }

    fn unregister_provider(&self, key: &str) {
        self.providers.borrow_mut().remove(key);
    }

    fn consume_restored_state(&self, key: &str) -> Option<Bundle> {
        self.restored.borrow_mut().remove(key)
    }

    fn perform_save(&self) -> SavedStateSnapshot {
        // Restored state nobody consumed yet survives another save
        let mut snapshot = self.restored.borrow().clone();
        let providers: Vec<_> = self
            .providers
            .borrow()
            .iter()
            .map(|(key, provider)| (key.clone(), Rc::clone(provider)))
            .collect();
        for (key, provider) in providers {
            snapshot.insert(key, provider.save_state());
        }
        snapshot
    }
}

impl fmt::Debug for MemorySavedStateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySavedStateRegistry")
            .field("providers", &self.providers.borrow().keys().collect::<Vec<_>>())
            .field("restored", &self.restored.borrow().len())
            .finish()
    }
}

/// Saved state owned by one lifecycle entry
///
/// Starts out with whatever was restored for the entry and is registered with
/// the saved-state registry as the entry's provider.
#[derive(Debug, Default)]
pub struct EntrySavedState {
    bundle: RefCell<Bundle>,
}

impl EntrySavedState {
    /// Wrap a restored (or empty) bundle
    pub fn new(restored: Bundle) -> Self {
        Self {
            bundle: RefCell::new(restored),
        }
    }

    /// Raw value stored under `key`
    pub fn get(&self, key: &str) -> Option<Value> {
        self.bundle.borrow().get(key).cloned()
    }

    /// Store a raw value under `key`
    pub fn put(&self, key: &str, value: Value) {
        self.bundle.borrow_mut().insert(key.to_string(), value);
    }

    /// Forget `key`
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.bundle.borrow_mut().remove(key)
    }

    /// Value under `key` decoded as `T`
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> NavigationResult<Option<T>> {
        match self.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` and store it under `key`
    pub fn put_as<T: Serialize>(&self, key: &str, value: &T) -> NavigationResult<()> {
        self.put(key, serde_json::to_value(value)?);
        Ok(())
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.bundle.borrow().is_empty()
    }
}

impl SavedStateProvider for EntrySavedState {
    fn save_state(&self) -> Bundle {
        self.bundle.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(key: &str, value: Value) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.insert(key.to_string(), value);
        bundle
    }

    #[test]
    fn test_perform_save_collects_providers() {
        let registry = MemorySavedStateRegistry::new();
        let state = Rc::new(EntrySavedState::default());
        registry.register_provider("entry", state.clone());

        state.put("scroll", json!(120));
        let snapshot = registry.perform_save();
        assert_eq!(snapshot["entry"]["scroll"], json!(120));

        registry.unregister_provider("entry");
        assert!(registry.perform_save().is_empty());
        // Unknown key is a no-op
        registry.unregister_provider("entry");
    }

    #[test]
    fn test_restored_state_is_consumed_once() {
        let mut snapshot = SavedStateSnapshot::new();
        snapshot.insert("entry".to_string(), bundle("query", json!("rust")));
        let registry = MemorySavedStateRegistry::from_snapshot(snapshot);

        let restored = registry.consume_restored_state("entry").unwrap();
        assert_eq!(restored["query"], json!("rust"));
        assert!(registry.consume_restored_state("entry").is_none());
    }

    #[test]
    fn test_unconsumed_state_survives_save() {
        let mut snapshot = SavedStateSnapshot::new();
        snapshot.insert("later".to_string(), bundle("n", json!(1)));
        let registry = MemorySavedStateRegistry::from_snapshot(snapshot);
        assert!(registry.perform_save().contains_key("later"));
    }

    #[test]
    fn test_register_replaces_provider() {
        let registry = MemorySavedStateRegistry::new();
        registry.register_provider("k", Rc::new(EntrySavedState::new(bundle("v", json!(1)))));
        registry.register_provider("k", Rc::new(EntrySavedState::new(bundle("v", json!(2)))));
        assert_eq!(registry.provider_count(), 1);
        assert_eq!(registry.perform_save()["k"]["v"], json!(2));
    }

    #[test]
    fn test_typed_access() {
        let state = EntrySavedState::default();
        state.put_as("ids", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(state.get_as::<Vec<u32>>("ids").unwrap(), Some(vec![1, 2, 3]));
        assert!(state.get_as::<String>("ids").is_err());
        assert_eq!(state.get_as::<u8>("missing").unwrap(), None);
    }
}
