//! Lifecycle Integration Tests
//!
//! Drives a navigator and its lifecycle manager the way a rendering layer
//! would: read the render group after every change, report disposals.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{config, Route};
use zos_navigation::{
    EntryId, EntryPhase, HostLifecycle, LifecycleEvent, LifecycleManager, LifecycleManagerDeps,
    LifecycleState, MemoryViewModelStores, Navigator, ViewModel,
};

fn manager() -> LifecycleManager<Route> {
    LifecycleManager::new(LifecycleManagerDeps::default())
}

fn state(manager: &mut LifecycleManager<Route>, id: &EntryId) -> Option<LifecycleState> {
    manager.entry(id).map(|entry| entry.lifecycle_state())
}

fn id(navigator: &Navigator<Route>, index: usize) -> EntryId {
    navigator.backstack()[index].id.clone()
}

#[test]
fn test_dialog_push_leaves_screen_started() {
    let mut navigator = Navigator::new(config(), [Route::Home]);
    let mut manager = manager();
    manager.render_group(&navigator);
    assert_eq!(state(&mut manager, &id(&navigator, 0)), Some(LifecycleState::Resumed));

    navigator.push(Route::Confirm("discard".into()));
    manager.render_group(&navigator);
    assert_eq!(state(&mut manager, &id(&navigator, 0)), Some(LifecycleState::Started));
    assert_eq!(state(&mut manager, &id(&navigator, 1)), Some(LifecycleState::Resumed));

    navigator.pop();
    manager.on_entry_disposed(&navigator);
    assert_eq!(state(&mut manager, &id(&navigator, 0)), Some(LifecycleState::Resumed));
    assert_eq!(manager.entries().len(), 1);
}

#[test]
fn test_sheet_under_dialog_is_started() {
    let mut navigator = Navigator::new(config(), [Route::Home, Route::Filters]);
    let mut manager = manager();
    manager.render_group(&navigator);
    let sheet = id(&navigator, 1);
    assert_eq!(state(&mut manager, &sheet), Some(LifecycleState::Resumed));

    navigator.push(Route::Confirm("apply".into()));
    let group = manager.render_group(&navigator).clone();
    assert_eq!(group.bottom_sheet.as_ref(), Some(&sheet));
    assert_eq!(state(&mut manager, &sheet), Some(LifecycleState::Started));
    assert_eq!(state(&mut manager, &id(&navigator, 0)), Some(LifecycleState::Started));
}

#[test]
fn test_set_root_destroys_old_root_once_disposed() {
    let mut navigator = Navigator::new(config(), [Route::Home]);
    let mut manager = manager();
    manager.render_group(&navigator);
    let old_root = id(&navigator, 0);

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    manager
        .entry_mut(&old_root)
        .unwrap()
        .add_observer(move |event| sink.borrow_mut().push(event));

    navigator.set_root(Route::Detail(26));
    manager.render_group(&navigator);
    // Still animating out
    assert_eq!(
        manager.entry(&old_root).map(|entry| entry.phase()),
        Some(EntryPhase::PendingDestroy)
    );
    assert!(!events.borrow().contains(&LifecycleEvent::OnDestroy));

    manager.on_entry_disposed(&navigator);
    assert!(manager.entry(&old_root).is_none());
    assert_eq!(
        *events.borrow(),
        [LifecycleEvent::OnPause, LifecycleEvent::OnStop, LifecycleEvent::OnDestroy]
    );
}

#[test]
fn test_remove_all_then_dispose() {
    let mut navigator = Navigator::new(
        config(),
        [Route::Home, Route::Detail(1), Route::Detail(2), Route::Home],
    );
    let mut manager = manager();
    for index in 0..4 {
        manager.create_lifecycle_entry(&id(&navigator, index));
    }
    manager.render_group(&navigator);
    assert_eq!(manager.entries().len(), 4);

    navigator.remove_all(|key| matches!(key, Route::Detail(_)));
    let destroyed = manager.on_entry_disposed(&navigator);
    assert_eq!(destroyed.len(), 2);
    assert_eq!(manager.entries().len(), 2);
    assert_eq!(state(&mut manager, &id(&navigator, 0)), Some(LifecycleState::Created));
    assert_eq!(state(&mut manager, &id(&navigator, 1)), Some(LifecycleState::Resumed));
}

#[test]
fn test_pop_to_keeps_entries_until_disposed() {
    let mut navigator = Navigator::new(config(), [Route::Home]);
    let mut manager = manager();
    manager.render_group(&navigator);
    navigator.push(Route::Detail(1));
    manager.render_group(&navigator);
    navigator.push(Route::Detail(2));
    manager.render_group(&navigator);
    let popped = id(&navigator, 2);

    assert!(navigator.pop_to(|key| *key == Route::Detail(1), false));
    manager.render_group(&navigator);
    assert_eq!(state(&mut manager, &popped), Some(LifecycleState::Created));
    assert_eq!(state(&mut manager, &id(&navigator, 1)), Some(LifecycleState::Resumed));

    manager.on_entry_disposed(&navigator);
    assert_eq!(state(&mut manager, &popped), None);
}

#[test]
fn test_view_models_survive_until_destroy() {
    struct Editor {
        cleared: Rc<RefCell<u32>>,
    }

    impl ViewModel for Editor {
        fn on_cleared(&self) {
            *self.cleared.borrow_mut() += 1;
        }
    }

    let stores = Rc::new(MemoryViewModelStores::new());
    let deps = LifecycleManagerDeps {
        view_model_stores: stores.clone(),
        ..Default::default()
    };
    let mut navigator = Navigator::new(config(), [Route::Home]);
    let mut manager = LifecycleManager::new(deps);
    navigator.push(Route::Detail(1));
    manager.render_group(&navigator);

    let detail = id(&navigator, 1);
    let cleared = Rc::new(RefCell::new(0));
    let store = manager.entry(&detail).unwrap().view_model_store().unwrap().clone();
    let editor = store.get_or_insert_with(|| Editor {
        cleared: Rc::clone(&cleared),
    });

    // Moving away keeps the model
    navigator.push(Route::Detail(2));
    manager.on_entry_disposed(&navigator);
    let same = store.get_or_insert_with(|| Editor {
        cleared: Rc::new(RefCell::new(0)),
    });
    assert!(Rc::ptr_eq(&editor, &same));

    navigator.remove_entry(&detail);
    manager.on_entry_disposed(&navigator);
    assert_eq!(*cleared.borrow(), 1);
    assert!(!stores.contains(detail.as_str()));
}

#[test]
fn test_host_lifecycle_caps_entries() {
    let host = HostLifecycle::new(LifecycleState::Started);
    let deps = LifecycleManagerDeps {
        host_lifecycle: host.clone(),
        ..Default::default()
    };
    let navigator = Navigator::new(config(), [Route::Home]);
    let mut manager = LifecycleManager::new(deps);
    manager.render_group(&navigator);
    let home = id(&navigator, 0);
    assert_eq!(state(&mut manager, &home), Some(LifecycleState::Started));

    host.set_state(LifecycleState::Resumed);
    manager.poll_host_lifecycle();
    assert_eq!(state(&mut manager, &home), Some(LifecycleState::Resumed));

    manager.on_dispose();
    assert_eq!(state(&mut manager, &home), Some(LifecycleState::Destroyed));
    assert_eq!(host.subscriber_count(), 0);
}
