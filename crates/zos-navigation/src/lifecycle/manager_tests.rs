use std::cell::RefCell;

use serde_json::json;

use super::*;
use crate::backstack::BackstackEntry;
use crate::key::test_support::{config, TestKey};
use crate::lifecycle::{DefaultRenderGroup, EntryPhase, LifecycleEvent};
use crate::persistence::{SavedStateSnapshot, ViewModel};

struct Harness {
    registry: Rc<MemorySavedStateRegistry>,
    stores: Rc<MemoryViewModelStores>,
    saveable: Rc<MemorySaveableStateHolder>,
    host: HostLifecycle,
}

impl Harness {
    fn new() -> Self {
        Self::with_registry(MemorySavedStateRegistry::new())
    }

    fn with_registry(registry: MemorySavedStateRegistry) -> Self {
        Self {
            registry: Rc::new(registry),
            stores: Rc::new(MemoryViewModelStores::new()),
            saveable: Rc::new(MemorySaveableStateHolder::new()),
            host: HostLifecycle::new(LifecycleState::Resumed),
        }
    }

    fn deps(&self) -> LifecycleManagerDeps {
        LifecycleManagerDeps {
            saved_state_registry: self.registry.clone(),
            view_model_stores: self.stores.clone(),
            saveable_state: self.saveable.clone(),
            host_lifecycle: self.host.clone(),
        }
    }
}

fn state_of(manager: &mut LifecycleManager<TestKey>, id: &EntryId) -> LifecycleState {
    manager
        .entry(id)
        .map(LifecycleEntry::lifecycle_state)
        .unwrap_or(LifecycleState::Destroyed)
}

fn id_at(navigator: &Navigator<TestKey>, index: usize) -> EntryId {
    navigator.backstack()[index].id.clone()
}

#[test]
fn test_single_screen_is_resumed() {
    let harness = Harness::new();
    let navigator = Navigator::new(config(), [TestKey::Screen(1)]);
    let mut manager = LifecycleManager::new(harness.deps());

    let group = manager.render_group(&navigator).clone();
    let screen = id_at(&navigator, 0);
    assert_eq!(group.screen.as_ref(), Some(&screen));
    assert_eq!(state_of(&mut manager, &screen), LifecycleState::Resumed);
    assert_eq!(manager.entry(&screen).unwrap().phase(), EntryPhase::AliveVisible);
}

#[test]
fn test_dialog_over_screen_pauses_screen() {
    let harness = Harness::new();
    let mut navigator = Navigator::new(config(), [TestKey::Screen(1)]);
    let mut manager = LifecycleManager::new(harness.deps());
    manager.render_group(&navigator);

    navigator.push(TestKey::Dialog(1));
    let group = manager.render_group(&navigator).clone();
    let (screen, dialog) = (id_at(&navigator, 0), id_at(&navigator, 1));

    assert_eq!(group.screen.as_ref(), Some(&screen));
    assert_eq!(group.dialog.as_ref(), Some(&dialog));
    assert_eq!(state_of(&mut manager, &screen), LifecycleState::Started);
    assert_eq!(state_of(&mut manager, &dialog), LifecycleState::Resumed);
}

#[test]
fn test_dialog_over_dialog_resumes_only_top() {
    let harness = Harness::new();
    let mut navigator = Navigator::new(config(), [TestKey::Screen(1), TestKey::Dialog(1)]);
    let mut manager = LifecycleManager::new(harness.deps());
    manager.render_group(&navigator);

    navigator.push(TestKey::Dialog(2));
    let group = manager.render_group(&navigator).clone();
    let (screen, first, second) = (
        id_at(&navigator, 0),
        id_at(&navigator, 1),
        id_at(&navigator, 2),
    );

    assert_eq!(group.dialog.as_ref(), Some(&second));
    assert_eq!(state_of(&mut manager, &second), LifecycleState::Resumed);
    assert_eq!(state_of(&mut manager, &screen), LifecycleState::Started);
    // Still in the backstack, no longer drawn
    assert_eq!(state_of(&mut manager, &first), LifecycleState::Created);
    assert_eq!(manager.entry(&first).unwrap().phase(), EntryPhase::AliveHidden);
}

#[test]
fn test_sheet_stays_drawn_under_dialogs_only() {
    let harness = Harness::new();
    let mut navigator = Navigator::new(
        config(),
        [TestKey::Screen(1), TestKey::Sheet(1), TestKey::Dialog(1)],
    );
    let mut manager = LifecycleManager::new(harness.deps());

    let group = manager.render_group(&navigator).clone();
    let sheet = id_at(&navigator, 1);
    assert_eq!(group.bottom_sheet.as_ref(), Some(&sheet));
    assert_eq!(state_of(&mut manager, &sheet), LifecycleState::Started);

    navigator.push(TestKey::Screen(2));
    let group = manager.render_group(&navigator).clone();
    assert_eq!(group.bottom_sheet, None);
    assert_eq!(group.dialog, None);
    assert_eq!(group.screen.as_ref(), Some(&id_at(&navigator, 3)));
    assert_eq!(state_of(&mut manager, &sheet), LifecycleState::Created);
}

#[test]
fn test_empty_backstack_renders_nothing() {
    let harness = Harness::new();
    let navigator = Navigator::new(config(), std::iter::empty());
    let mut manager = LifecycleManager::new(harness.deps());
    assert_eq!(manager.render_group(&navigator), &DefaultRenderGroup::default());
    assert!(manager.entries().is_empty());
}

#[test]
fn test_render_group_cached_until_backstack_changes() {
    let harness = Harness::new();
    let mut navigator = Navigator::new(config(), [TestKey::Screen(1)]);
    let mut manager = LifecycleManager::new(harness.deps());

    let screen = id_at(&navigator, 0);
    manager.render_group(&navigator);
    // A ceiling changed behind the policy's back survives a cached read
    manager
        .entry_mut(&screen)
        .unwrap()
        .set_max_state(LifecycleState::Created);
    manager.render_group(&navigator);
    assert_eq!(state_of(&mut manager, &screen), LifecycleState::Created);

    navigator.push(TestKey::Screen(2));
    manager.render_group(&navigator);
    assert_eq!(state_of(&mut manager, &screen), LifecycleState::Created);
    assert_eq!(
        state_of(&mut manager, &id_at(&navigator, 1)),
        LifecycleState::Resumed
    );
}

#[test]
fn test_set_root_destroys_old_root_after_disposal() {
    let harness = Harness::new();
    let mut navigator = Navigator::new(config(), [TestKey::Screen(1)]);
    let mut manager = LifecycleManager::new(harness.deps());
    manager.render_group(&navigator);

    let old_root = id_at(&navigator, 0);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    manager
        .entry_mut(&old_root)
        .unwrap()
        .add_observer(move |event| sink.borrow_mut().push(event));

    navigator.set_root(TestKey::Screen(26));
    manager.render_group(&navigator);
    let pending = manager.entry(&old_root).unwrap();
    assert_eq!(pending.phase(), EntryPhase::PendingDestroy);
    assert_eq!(pending.lifecycle_state(), LifecycleState::Created);
    assert!(harness.registry.is_registered(old_root.as_str()));

    let destroyed = manager.on_entry_disposed(&navigator);
    assert_eq!(destroyed.len(), 1);
    assert_eq!(destroyed[0].id(), &old_root);
    assert_eq!(destroyed[0].phase(), EntryPhase::Destroyed);
    assert_eq!(destroyed[0].lifecycle_state(), LifecycleState::Destroyed);
    assert_eq!(events.borrow().last(), Some(&LifecycleEvent::OnDestroy));

    assert!(manager.entry(&old_root).is_none());
    assert!(!harness.registry.is_registered(old_root.as_str()));
    assert!(!harness.stores.contains(old_root.as_str()));
    assert_eq!(navigator.backstack().len(), 1);
    assert_eq!(
        state_of(&mut manager, &id_at(&navigator, 0)),
        LifecycleState::Resumed
    );
}

#[test]
fn test_disposal_keeps_live_entries() {
    let harness = Harness::new();
    let mut navigator = Navigator::new(config(), [TestKey::Screen(1), TestKey::Screen(2)]);
    let mut manager = LifecycleManager::new(harness.deps());
    manager.create_lifecycle_entry(&id_at(&navigator, 0));
    manager.render_group(&navigator);

    assert!(manager.on_entry_disposed(&navigator).is_empty());
    assert_eq!(manager.entries().len(), 2);

    navigator.pop();
    let destroyed = manager.on_entry_disposed(&navigator);
    assert_eq!(destroyed.len(), 1);
    assert_eq!(
        state_of(&mut manager, &id_at(&navigator, 0)),
        LifecycleState::Resumed
    );
}

#[test]
fn test_destroy_releases_resources() {
    struct Draft(Rc<RefCell<bool>>);
    impl ViewModel for Draft {
        fn on_cleared(&self) {
            *self.0.borrow_mut() = true;
        }
    }

    let harness = Harness::new();
    let mut navigator = Navigator::new(config(), [TestKey::Screen(1), TestKey::Sheet(1)]);
    let mut manager = LifecycleManager::new(harness.deps());
    manager.render_group(&navigator);

    let sheet = id_at(&navigator, 1);
    let cleared = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&cleared);
    let entry = manager.entry(&sheet).unwrap();
    entry
        .view_model_store()
        .unwrap()
        .get_or_insert_with(move || Draft(flag));
    harness.saveable.save_state(sheet.as_str(), Default::default());
    let node = navigator.navigation_node(&navigator.backstack()[1]);

    navigator.pop();
    manager.on_entry_disposed(&navigator);

    assert!(*cleared.borrow());
    assert!(!harness.saveable.contains(sheet.as_str()));
    let rebuilt = navigator.navigation_node(&BackstackEntry::with_id(TestKey::Sheet(1), sheet));
    assert!(!Rc::ptr_eq(&node, &rebuilt));
}

#[test]
fn test_host_state_caps_every_entry() {
    let harness = Harness::new();
    let navigator = Navigator::new(config(), [TestKey::Screen(1)]);
    let mut manager = LifecycleManager::new(harness.deps());
    manager.render_group(&navigator);
    let screen = id_at(&navigator, 0);

    harness.host.set_state(LifecycleState::Created);
    manager.poll_host_lifecycle();
    assert_eq!(state_of(&mut manager, &screen), LifecycleState::Created);

    harness.host.set_state(LifecycleState::Resumed);
    manager.render_group(&navigator);
    assert_eq!(state_of(&mut manager, &screen), LifecycleState::Resumed);
    assert_eq!(
        manager.entry(&screen).unwrap().nav_host_state(),
        LifecycleState::Resumed
    );
}

#[test]
fn test_entries_created_after_host_destroyed_have_no_resources() {
    let harness = Harness::new();
    harness.host.set_state(LifecycleState::Destroyed);
    let navigator = Navigator::new(config(), [TestKey::Screen(1)]);
    let mut manager: LifecycleManager<TestKey> = LifecycleManager::new(harness.deps());

    let entry = manager.create_lifecycle_entry(&id_at(&navigator, 0));
    assert!(entry.saved_state().is_none());
    assert!(entry.view_model_store().is_none());
    assert_eq!(entry.lifecycle_state(), LifecycleState::Destroyed);
    assert_eq!(harness.registry.provider_count(), 0);
}

#[test]
fn test_on_dispose_destroys_but_keeps_saved_state() {
    let harness = Harness::new();
    let navigator = Navigator::new(config(), [TestKey::Screen(1)]);
    let mut manager = LifecycleManager::new(harness.deps());
    manager.render_group(&navigator);
    let screen = id_at(&navigator, 0);
    manager
        .entry(&screen)
        .unwrap()
        .saved_state()
        .unwrap()
        .put("scroll", json!(40));
    assert_eq!(harness.host.subscriber_count(), 1);

    manager.on_dispose();
    assert!(manager.is_disposed());
    assert_eq!(harness.host.subscriber_count(), 0);
    assert_eq!(state_of(&mut manager, &screen), LifecycleState::Destroyed);
    assert_eq!(harness.registry.perform_save()[screen.as_str()]["scroll"], json!(40));

    // Detached from the host
    harness.host.set_state(LifecycleState::Started);
    manager.poll_host_lifecycle();
    assert_eq!(state_of(&mut manager, &screen), LifecycleState::Destroyed);
    assert!(manager.entry(&screen).is_some());
}

#[test]
fn test_restore_reattaches_and_cleans_up() {
    let harness = Harness::new();
    let mut navigator = Navigator::new(config(), [TestKey::Screen(1), TestKey::Screen(2)]);
    let mut manager = LifecycleManager::new(harness.deps());
    manager.create_lifecycle_entry(&id_at(&navigator, 0));
    manager.render_group(&navigator);
    let (kept, popped) = (id_at(&navigator, 0), id_at(&navigator, 1));
    manager
        .entry(&kept)
        .unwrap()
        .saved_state()
        .unwrap()
        .put("query", json!("rust"));

    let snapshot = manager.save_state();
    let saved: SavedStateSnapshot = harness.registry.perform_save();
    let navigator_state = {
        navigator.pop();
        navigator.save_state()
    };
    manager.on_dispose();
    drop(manager);

    // Process death: everything comes back from serialized state
    let snapshot: ManagerSnapshot =
        serde_json::from_str(&serde_json::to_string(&snapshot).unwrap()).unwrap();
    let restored_harness = Harness::with_registry(MemorySavedStateRegistry::from_snapshot(saved));
    let navigator = Navigator::restore(config(), navigator_state);
    let mut restored = LifecycleManager::restore(
        snapshot.clone(),
        &navigator,
        DefaultRenderPolicy,
        restored_harness.deps(),
    );

    assert_eq!(restored.id(), &snapshot.id);
    assert_eq!(restored.entries().ids(), vec![kept.clone()]);
    let saved_state = restored.entry(&kept).unwrap().saved_state().unwrap();
    assert_eq!(saved_state.get("query"), Some(json!("rust")));
    assert!(restored_harness
        .registry
        .consume_restored_state(popped.as_str())
        .is_none());
}

#[test]
fn test_entry_read_reflects_host_change_without_poll() {
    let harness = Harness::new();
    let navigator = Navigator::new(config(), [TestKey::Screen(1)]);
    let mut manager = LifecycleManager::new(harness.deps());
    manager.render_group(&navigator);
    let screen = id_at(&navigator, 0);

    harness.host.set_state(LifecycleState::Created);
    let entry = manager.entry(&screen).unwrap();
    assert_eq!(entry.nav_host_state(), LifecycleState::Created);
    assert_eq!(entry.lifecycle_state(), LifecycleState::Created);

    harness.host.set_state(LifecycleState::Started);
    assert!(manager
        .entries()
        .iter()
        .all(|entry| entry.lifecycle_state() == LifecycleState::Started));
}

#[test]
fn test_disposal_releases_nodes_of_untracked_entries() {
    let harness = Harness::new();
    let mut navigator = Navigator::new(config(), [TestKey::Screen(1)]);
    let mut manager = LifecycleManager::new(harness.deps());

    for round in 0..50 {
        navigator.push_all([TestKey::Screen(round * 2 + 2), TestKey::Screen(round * 2 + 3)]);
        manager.render_group(&navigator);
        navigator.pop_to_root();
        manager.render_group(&navigator);
        manager.on_entry_disposed(&navigator);

        assert_eq!(navigator.backstack().len(), 1);
        assert_eq!(manager.entries().len(), 1);
        assert_eq!(navigator.cached_node_count(), 1);
    }
}
