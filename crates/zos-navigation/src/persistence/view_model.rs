//! View-model stores

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// State scoped to one backstack entry that outlives redraws
pub trait ViewModel: Any {
    /// Called once when the owning store is cleared
    fn on_cleared(&self) {}
}

struct StoredModel {
    any: Rc<dyn Any>,
    model: Rc<dyn ViewModel>,
}

/// One view model per type for a single entry
#[derive(Default)]
pub struct ViewModelStore {
    models: RefCell<HashMap<TypeId, StoredModel>>,
}

impl ViewModelStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored `T`, building it with `init` on first request
    pub fn get_or_insert_with<T, F>(&self, init: F) -> Rc<T>
    where
        T: ViewModel,
        F: FnOnce() -> T,
    {
        if let Some(model) = self.get::<T>() {
            return model;
        }
        // Built outside the borrow so `init` may use the store itself
        let model = Rc::new(init());
        self.models.borrow_mut().insert(
            TypeId::of::<T>(),
            StoredModel {
                any: model.clone(),
                model: model.clone(),
            },
        );
        model
    }

    /// The stored `T`, if any
    pub fn get<T: ViewModel>(&self) -> Option<Rc<T>> {
        let models = self.models.borrow();
        let stored = models.get(&TypeId::of::<T>())?;
        Rc::clone(&stored.any).downcast::<T>().ok()
    }

    /// Number of stored models
    pub fn len(&self) -> usize {
        self.models.borrow().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.models.borrow().is_empty()
    }

    /// Drop every model, calling [`ViewModel::on_cleared`] on each
    pub fn clear(&self) {
        let models = std::mem::take(&mut *self.models.borrow_mut());
        for stored in models.into_values() {
            stored.model.on_cleared();
        }
    }
}

impl fmt::Debug for ViewModelStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModelStore")
            .field("models", &self.len())
            .finish()
    }
}

/// Owner of the view-model stores of every entry, keyed by entry id
pub trait ViewModelStoreProvider {
    /// The store for `id`, created on first request
    fn store(&self, id: &str) -> Rc<ViewModelStore>;

    /// Clear and forget the store for `id`
    fn release(&self, id: &str);
}

/// In-memory [`ViewModelStoreProvider`]
#[derive(Default)]
pub struct MemoryViewModelStores {
    stores: RefCell<HashMap<String, Rc<ViewModelStore>>>,
}

impl MemoryViewModelStores {
    /// Create a provider with no stores
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a store exists for `id`
    pub fn contains(&self, id: &str) -> bool {
        self.stores.borrow().contains_key(id)
    }

    /// Number of live stores
    pub fn len(&self) -> usize {
        self.stores.borrow().len()
    }

    /// Whether no stores are live
    pub fn is_empty(&self) -> bool {
        self.stores.borrow().is_empty()
    }
}

impl ViewModelStoreProvider for MemoryViewModelStores {
    fn store(&self, id: &str) -> Rc<ViewModelStore> {
        Rc::clone(
            self.stores
                .borrow_mut()
                .entry(id.to_string())
                .or_default(),
        )
    }

    fn release(&self, id: &str) {
        let store = self.stores.borrow_mut().remove(id);
        if let Some(store) = store {
            store.clear();
        }
    }
}

impl fmt::Debug for MemoryViewModelStores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryViewModelStores")
            .field("stores", &self.len())
            .finish()
    }
}
