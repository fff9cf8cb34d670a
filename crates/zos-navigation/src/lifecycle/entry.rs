//! Lifecycle entries

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::persistence::{EntrySavedState, ViewModelStore};
use crate::types::EntryId;

use super::registry::LifecycleRegistry;
use super::state::{LifecycleEvent, LifecycleState};

/// Where an entry stands between creation and teardown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryPhase {
    /// In the backstack and in the render group
    AliveVisible,
    /// In the backstack but not rendered
    AliveHidden,
    /// Left the backstack; waiting for the rendering layer to let go
    PendingDestroy,
    /// Resources released
    Destroyed,
}

impl EntryPhase {
    /// Whether the entry still belongs to the backstack
    pub fn is_alive(self) -> bool {
        matches!(self, Self::AliveVisible | Self::AliveHidden)
    }
}

/// Lifecycle-scoped resources of one backstack entry
///
/// The effective state is always `min(nav_host_state, max_state)`: the host
/// mirror and the ceiling are the only inputs.
pub struct LifecycleEntry {
    id: EntryId,
    registry: LifecycleRegistry,
    nav_host_state: LifecycleState,
    max_state: LifecycleState,
    phase: EntryPhase,
    pub(super) saved_state: Option<Rc<EntrySavedState>>,
    pub(super) view_model_store: Option<Rc<ViewModelStore>>,
}

impl LifecycleEntry {
    pub(super) fn new(id: EntryId) -> Self {
        Self {
            id,
            registry: LifecycleRegistry::new(),
            nav_host_state: LifecycleState::Initialized,
            max_state: LifecycleState::Initialized,
            phase: EntryPhase::AliveHidden,
            saved_state: None,
            view_model_store: None,
        }
    }

    /// Id of the backstack entry this belongs to
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// The effective lifecycle state
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.registry.current_state()
    }

    /// Mirror of the host's state
    pub fn nav_host_state(&self) -> LifecycleState {
        self.nav_host_state
    }

    /// Ceiling assigned by the render policy
    pub fn max_state(&self) -> LifecycleState {
        self.max_state
    }

    /// Current teardown phase
    pub fn phase(&self) -> EntryPhase {
        self.phase
    }

    /// Saved state, bound when the host was alive at creation
    pub fn saved_state(&self) -> Option<&Rc<EntrySavedState>> {
        self.saved_state.as_ref()
    }

    /// View-model store, bound when the host was alive at creation
    pub fn view_model_store(&self) -> Option<&Rc<ViewModelStore>> {
        self.view_model_store.as_ref()
    }

    /// Receive this entry's lifecycle events
    pub fn add_observer(&mut self, observer: impl FnMut(LifecycleEvent) + 'static) {
        self.registry.add_observer(observer);
    }

    /// Set the ceiling
    pub fn set_max_state(&mut self, state: LifecycleState) {
        self.max_state = state;
        self.update_state();
    }

    pub(super) fn set_nav_host_state(&mut self, state: LifecycleState) {
        self.nav_host_state = state;
        self.update_state();
    }

    pub(super) fn set_phase(&mut self, phase: EntryPhase) {
        self.phase = phase;
    }

    fn update_state(&mut self) {
        self.registry
            .set_current_state(self.nav_host_state.min(self.max_state));
    }
}

impl fmt::Debug for LifecycleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleEntry")
            .field("id", &self.id)
            .field("state", &self.lifecycle_state())
            .field("nav_host_state", &self.nav_host_state)
            .field("max_state", &self.max_state)
            .field("phase", &self.phase)
            .finish()
    }
}
