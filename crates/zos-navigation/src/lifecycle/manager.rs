//! Lifecycle manager
//!
//! Maps every live backstack entry id to a [`LifecycleEntry`] and keeps the
//! entries' ceilings in step with the backstack, the rendering layer and the
//! host.
//!
//! # Teardown
//!
//! An entry that leaves the backstack is not destroyed right away. It moves
//! to [`EntryPhase::PendingDestroy`](super::EntryPhase::PendingDestroy) and
//! keeps its resources while the rendering layer may still be animating it
//! out. Only [`LifecycleManager::on_entry_disposed`] destroys pending entries.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::key::NavigationKey;
use crate::navigator::Navigator;
use crate::persistence::{
    MemorySaveableStateHolder, MemorySavedStateRegistry, MemoryViewModelStores,
    SaveableStateHolder, SavedStateRegistry, ViewModelStoreProvider,
};
use crate::types::{EntryId, ManagerId};

use super::entries::LifecycleEntries;
use super::entry::LifecycleEntry;
use super::host::{HostLifecycle, HostSubscription};
use super::policy::{DefaultRenderPolicy, RenderPolicy};
use super::state::LifecycleState;

/// External collaborators of a [`LifecycleManager`]
#[derive(Clone)]
pub struct LifecycleManagerDeps {
    /// Receives one provider per entry id
    pub saved_state_registry: Rc<dyn SavedStateRegistry>,
    /// Owns one view-model store per entry id
    pub view_model_stores: Rc<dyn ViewModelStoreProvider>,
    /// Keeps UI-state snapshots per entry id
    pub saveable_state: Rc<dyn SaveableStateHolder>,
    /// The owning host's lifecycle
    pub host_lifecycle: HostLifecycle,
}

impl Default for LifecycleManagerDeps {
    /// In-memory substrate and a resumed host
    fn default() -> Self {
        Self {
            saved_state_registry: Rc::new(MemorySavedStateRegistry::new()),
            view_model_stores: Rc::new(MemoryViewModelStores::new()),
            saveable_state: Rc::new(MemorySaveableStateHolder::new()),
            host_lifecycle: HostLifecycle::new(LifecycleState::Resumed),
        }
    }
}

impl fmt::Debug for LifecycleManagerDeps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleManagerDeps")
            .field("host_lifecycle", &self.host_lifecycle)
            .finish_non_exhaustive()
    }
}

/// What a manager needs to survive process death
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSnapshot {
    /// The manager's id
    pub id: ManagerId,
    /// Ids of the entries it was tracking
    pub entry_ids: Vec<EntryId>,
}

/// Owner of every [`LifecycleEntry`] of one navigator
///
/// A manager is paired with a single navigator for its whole life and reads
/// it through the `&Navigator` passed to each operation. The render group is
/// recomputed lazily whenever the navigator's revision changed since the last
/// computation.
pub struct LifecycleManager<K, P = DefaultRenderPolicy>
where
    P: RenderPolicy<K>,
    K: NavigationKey,
{
    id: ManagerId,
    policy: P,
    entries: LifecycleEntries,
    host: HostLifecycle,
    host_subscription: Option<HostSubscription>,
    group: Option<P::Group>,
    group_revision: Option<u64>,
    _key: PhantomData<fn() -> K>,
}

impl<K: NavigationKey> LifecycleManager<K> {
    /// A manager using [`DefaultRenderPolicy`]
    pub fn new(deps: LifecycleManagerDeps) -> Self {
        Self::with_policy(DefaultRenderPolicy, deps)
    }
}

impl<K, P> LifecycleManager<K, P>
where
    K: NavigationKey,
    P: RenderPolicy<K>,
{
    /// A manager using a custom render policy
    pub fn with_policy(policy: P, deps: LifecycleManagerDeps) -> Self {
        Self::with_id(ManagerId::generate(), policy, deps)
    }

    fn with_id(id: ManagerId, policy: P, deps: LifecycleManagerDeps) -> Self {
        let host = deps.host_lifecycle.clone();
        let host_subscription = Some(host.subscribe());
        let entries = LifecycleEntries::new(deps, host.current_state());
        debug!(%id, host = %host.current_state(), "created lifecycle manager");
        Self {
            id,
            policy,
            entries,
            host,
            host_subscription,
            group: None,
            group_revision: None,
            _key: PhantomData,
        }
    }

    /// This manager's id
    pub fn id(&self) -> &ManagerId {
        &self.id
    }

    /// The render policy
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Tracked entries, after mirroring pending host changes
    pub fn entries(&mut self) -> &LifecycleEntries {
        self.poll_host_lifecycle();
        &self.entries
    }

    /// The entry tracked for `id`, after mirroring pending host changes
    ///
    /// Reading goes through `&mut self` so the returned state always honors
    /// the host's current state.
    pub fn entry(&mut self, id: &EntryId) -> Option<&LifecycleEntry> {
        self.poll_host_lifecycle();
        self.entries.get(id)
    }

    /// The entry tracked for `id`, mutably (to attach observers)
    pub fn entry_mut(&mut self, id: &EntryId) -> Option<&mut LifecycleEntry> {
        self.poll_host_lifecycle();
        self.entries.get_mut(id)
    }

    /// The entry for `id`, created on first request
    pub fn create_lifecycle_entry(&mut self, id: &EntryId) -> &mut LifecycleEntry {
        self.poll_host_lifecycle();
        self.entries.get_or_create(id)
    }

    /// The render group for the navigator's current backstack
    ///
    /// Recomputed, with ceilings reassigned, only when the navigator
    /// published a backstack since the last call.
    pub fn render_group(&mut self, navigator: &Navigator<K>) -> &P::Group {
        self.poll_host_lifecycle();
        let revision = navigator.revision();
        let group = match self.group.take() {
            Some(group) if self.group_revision == Some(revision) => group,
            _ => {
                let group = self.policy.render_group(navigator, &mut self.entries);
                self.policy
                    .update_lifecycles(&group, navigator.backstack(), &mut self.entries);
                self.entries.refresh_phases(&group, navigator.backstack());
                group
            }
        };
        self.group_revision = Some(revision);
        self.group.insert(group)
    }

    /// Mirror host lifecycle changes received since the last poll
    pub fn poll_host_lifecycle(&mut self) {
        let states = match &self.host_subscription {
            Some(subscription) => subscription.drain(),
            None => return,
        };
        for state in states {
            self.entries.set_host_state(state);
        }
    }

    /// The rendering layer let go of an entry
    ///
    /// Reassigns ceilings for the current render group, then destroys every
    /// entry that is no longer in the backstack. Returns the destroyed
    /// entries.
    pub fn on_entry_disposed(&mut self, navigator: &Navigator<K>) -> Vec<LifecycleEntry> {
        self.render_group(navigator);
        if let Some(group) = &self.group {
            self.policy
                .update_lifecycles(group, navigator.backstack(), &mut self.entries);
            self.entries.refresh_phases(group, navigator.backstack());
        }

        let destroyed: Vec<_> = self
            .entries
            .pending_destroy()
            .iter()
            .filter_map(|id| self.entries.destroy(id, navigator))
            .collect();
        let entries = &self.entries;
        let backstack = navigator.backstack();
        navigator.retain_nodes(|id| backstack.contains_id(id) || entries.contains(id));
        if !destroyed.is_empty() {
            debug!(count = destroyed.len(), "cleaned up disposed entries");
        }
        destroyed
    }

    /// The whole navigation container is gone
    ///
    /// Every entry's host mirror drops to destroyed and the host subscription
    /// is cancelled. Saved state stays registered for a later restore.
    pub fn on_dispose(&mut self) {
        self.poll_host_lifecycle();
        self.entries.set_host_state(LifecycleState::Destroyed);
        if let Some(subscription) = self.host_subscription.take() {
            subscription.cancel();
            debug!(id = %self.id, entries = self.entries.len(), "disposed lifecycle manager");
        }
    }

    /// Whether [`LifecycleManager::on_dispose`] ran
    pub fn is_disposed(&self) -> bool {
        self.host_subscription.is_none()
    }

    /// Capture the manager id and tracked entry ids
    pub fn save_state(&self) -> ManagerSnapshot {
        ManagerSnapshot {
            id: self.id.clone(),
            entry_ids: self.entries.ids(),
        }
    }

    /// Recreate a manager from a snapshot
    ///
    /// Entries still in the navigator's backstack are recreated and pick up
    /// their saved state and view-model stores; the rest were popped while
    /// the process was gone and are cleaned up immediately.
    pub fn restore(
        snapshot: ManagerSnapshot,
        navigator: &Navigator<K>,
        policy: P,
        deps: LifecycleManagerDeps,
    ) -> Self {
        let mut manager = Self::with_id(snapshot.id, policy, deps);
        let mut cleaned = 0;
        for id in &snapshot.entry_ids {
            if navigator.backstack().contains_id(id) {
                manager.entries.get_or_create(id);
            } else {
                manager.entries.discard(id);
                navigator.release_node(id);
                cleaned += 1;
            }
        }
        debug!(
            id = %manager.id,
            restored = manager.entries.len(),
            cleaned,
            "restored lifecycle manager"
        );
        manager
    }

    /// The host lifecycle this manager follows
    pub fn host_lifecycle(&self) -> &HostLifecycle {
        &self.host
    }
}

impl<K, P> fmt::Debug for LifecycleManager<K, P>
where
    K: NavigationKey,
    P: RenderPolicy<K> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleManager")
            .field("id", &self.id)
            .field("policy", &self.policy)
            .field("entries", &self.entries)
            .field("group_revision", &self.group_revision)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod manager_tests;
