//! The manager's entry map

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::debug;

use crate::backstack::Backstack;
use crate::key::NavigationKey;
use crate::navigator::Navigator;
use crate::persistence::{EntrySavedState, SavedStateProvider};
use crate::types::EntryId;

use super::entry::{EntryPhase, LifecycleEntry};
use super::manager::LifecycleManagerDeps;
use super::policy::RenderGroup;
use super::state::LifecycleState;

/// Live lifecycle entries keyed by backstack entry id
///
/// Render policies receive this to create entries on demand and to assign
/// ceilings; everything else about an entry's life is managed by the
/// [`LifecycleManager`](super::LifecycleManager).
#[derive(Debug)]
pub struct LifecycleEntries {
    entries: BTreeMap<EntryId, LifecycleEntry>,
    deps: LifecycleManagerDeps,
    host_state: LifecycleState,
}

impl LifecycleEntries {
    pub(super) fn new(deps: LifecycleManagerDeps, host_state: LifecycleState) -> Self {
        Self {
            entries: BTreeMap::new(),
            deps,
            host_state,
        }
    }

    /// The entry for `id`, created on first request
    ///
    /// A new entry is bound to its saved state and view-model store unless the
    /// host is already destroyed, mirrors the host state and starts with a
    /// [`LifecycleState::Started`] ceiling.
    pub fn get_or_create(&mut self, id: &EntryId) -> &mut LifecycleEntry {
        match self.entries.entry(id.clone()) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => slot.insert(create_entry(&self.deps, self.host_state, id)),
        }
    }

    /// The entry for `id`
    pub fn get(&self, id: &EntryId) -> Option<&LifecycleEntry> {
        self.entries.get(id)
    }

    /// The entry for `id`, mutably
    pub fn get_mut(&mut self, id: &EntryId) -> Option<&mut LifecycleEntry> {
        self.entries.get_mut(id)
    }

    /// Whether an entry exists for `id`
    pub fn contains(&self, id: &EntryId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of tracked entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are tracked
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked entries, ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &LifecycleEntry> {
        self.entries.values()
    }

    /// Tracked entries, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LifecycleEntry> {
        self.entries.values_mut()
    }

    /// Ids of every tracked entry
    pub fn ids(&self) -> Vec<EntryId> {
        self.entries.keys().cloned().collect()
    }

    /// The host state new entries start from
    pub fn host_state(&self) -> LifecycleState {
        self.host_state
    }

    pub(super) fn set_host_state(&mut self, state: LifecycleState) {
        self.host_state = state;
        for entry in self.entries.values_mut() {
            entry.set_nav_host_state(state);
        }
    }

    pub(super) fn refresh_phases<K, G>(&mut self, group: &G, backstack: &Backstack<K>)
    where
        G: RenderGroup + ?Sized,
    {
        for entry in self.entries.values_mut() {
            let phase = if !backstack.contains_id(entry.id()) {
                EntryPhase::PendingDestroy
            } else if group.contains(entry.id()) {
                EntryPhase::AliveVisible
            } else {
                EntryPhase::AliveHidden
            };
            entry.set_phase(phase);
        }
    }

    /// Ids waiting for teardown
    pub(super) fn pending_destroy(&self) -> Vec<EntryId> {
        self.entries
            .values()
            .filter(|entry| entry.phase() == EntryPhase::PendingDestroy)
            .map(|entry| entry.id().clone())
            .collect()
    }

    /// Destroy the entry for `id` and release everything bound to it
    pub(super) fn destroy<K: NavigationKey>(
        &mut self,
        id: &EntryId,
        navigator: &Navigator<K>,
    ) -> Option<LifecycleEntry> {
        let mut entry = self.entries.remove(id)?;
        entry.set_max_state(LifecycleState::Destroyed);
        entry.set_phase(EntryPhase::Destroyed);
        if entry.saved_state.take().is_some() {
            self.deps.saved_state_registry.unregister_provider(id.as_str());
        }
        if entry.view_model_store.take().is_some() {
            self.deps.view_model_stores.release(id.as_str());
        }
        self.deps.saveable_state.remove_state(id.as_str());
        navigator.release_node(id);
        debug!(%id, "destroyed lifecycle entry");
        Some(entry)
    }

    /// Drop every trace of an id that will never be recreated
    pub(super) fn discard(&self, id: &EntryId) {
        let key = id.as_str();
        self.deps.saved_state_registry.consume_restored_state(key);
        self.deps.saved_state_registry.unregister_provider(key);
        self.deps.view_model_stores.release(key);
        self.deps.saveable_state.remove_state(key);
    }
}

fn create_entry(
    deps: &LifecycleManagerDeps,
    host_state: LifecycleState,
    id: &EntryId,
) -> LifecycleEntry {
    let mut entry = LifecycleEntry::new(id.clone());
    if host_state != LifecycleState::Destroyed {
        let restored = deps
            .saved_state_registry
            .consume_restored_state(id.as_str())
            .unwrap_or_default();
        let saved_state = Rc::new(EntrySavedState::new(restored));
        deps.saved_state_registry.register_provider(
            id.as_str(),
            Rc::clone(&saved_state) as Rc<dyn SavedStateProvider>,
        );
        entry.saved_state = Some(saved_state);
        entry.view_model_store = Some(deps.view_model_stores.store(id.as_str()));
    }
    entry.set_max_state(LifecycleState::Started);
    entry.set_nav_host_state(host_state);
    debug!(%id, host = %host_state, "created lifecycle entry");
    entry
}
