//! Persistence substrate
//!
//! The lifecycle manager binds three kinds of per-entry resources, each keyed
//! by the entry id string:
//!
//! - **Saved state**: a [`Bundle`] per entry, collected through a
//!   [`SavedStateRegistry`] and handed back once after recreation
//! - **View models**: a [`ViewModelStore`] per entry, owned by a
//!   [`ViewModelStoreProvider`] for as long as the entry lives
//! - **Saveable UI state**: arbitrary snapshots kept by a
//!   [`SaveableStateHolder`]
//!
//! The traits are the seams a host platform plugs into; the `Memory*` types
//! are complete in-process implementations.

mod saveable;
mod saved_state;
mod view_model;

pub use saveable::{MemorySaveableStateHolder, SaveableStateHolder};
pub use saved_state::{
    Bundle, EntrySavedState, MemorySavedStateRegistry, SavedStateProvider, SavedStateRegistry,
    SavedStateSnapshot,
};
pub use view_model::{MemoryViewModelStores, ViewModel, ViewModelStore, ViewModelStoreProvider};
