//! Per-entry lifecycle register

use std::fmt;

use super::state::{LifecycleEvent, LifecycleState};

type Observer = Box<dyn FnMut(LifecycleEvent)>;

/// Current lifecycle state of one entry plus its observers
///
/// Moving to a new state walks every intermediate state and emits one event
/// per step. [`LifecycleState::Destroyed`] is terminal.
pub struct LifecycleRegistry {
    state: LifecycleState,
    observers: Vec<Observer>,
}

impl Default for LifecycleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleRegistry {
    /// A registry in [`LifecycleState::Initialized`]
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Initialized,
            observers: Vec::new(),
        }
    }

    /// The current state
    pub fn current_state(&self) -> LifecycleState {
        self.state
    }

    /// Receive every event emitted from now on
    pub fn add_observer(&mut self, observer: impl FnMut(LifecycleEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Move to `target` one step at a time
    pub fn set_current_state(&mut self, target: LifecycleState) {
        if self.state == LifecycleState::Destroyed || self.state == target {
            return;
        }
        // Never created, so nothing to tear down
        if self.state == LifecycleState::Initialized && target == LifecycleState::Destroyed {
            self.state = LifecycleState::Destroyed;
            return;
        }

        while self.state < target {
            match LifecycleEvent::up_from(self.state) {
                Some(event) => self.dispatch(event),
                None => break,
            }
        }
        while self.state > target {
            match LifecycleEvent::down_from(self.state) {
                Some(event) if event.target_state() >= target => self.dispatch(event),
                _ => break,
            }
        }
    }

    fn dispatch(&mut self, event: LifecycleEvent) {
        self.state = event.target_state();
        for observer in &mut self.observers {
            observer(event);
        }
    }
}

impl fmt::Debug for LifecycleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleRegistry")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded() -> (LifecycleRegistry, Rc<RefCell<Vec<LifecycleEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut registry = LifecycleRegistry::new();
        let sink = Rc::clone(&events);
        registry.add_observer(move |event| sink.borrow_mut().push(event));
        (registry, events)
    }

    #[test]
    fn test_steps_through_intermediate_states() {
        let (mut registry, events) = recorded();
        registry.set_current_state(LifecycleState::Resumed);
        registry.set_current_state(LifecycleState::Created);

        use LifecycleEvent::*;
        assert_eq!(
            *events.borrow(),
            [OnCreate, OnStart, OnResume, OnPause, OnStop]
        );
        assert_eq!(registry.current_state(), LifecycleState::Created);
    }

    #[test]
    fn test_destroyed_is_terminal() {
        let (mut registry, events) = recorded();
        registry.set_current_state(LifecycleState::Started);
        registry.set_current_state(LifecycleState::Destroyed);
        registry.set_current_state(LifecycleState::Resumed);

        assert_eq!(events.borrow().last(), Some(&LifecycleEvent::OnDestroy));
        assert_eq!(registry.current_state(), LifecycleState::Destroyed);
    }

    #[test]
    fn test_destroy_before_create_is_silent() {
        let (mut registry, events) = recorded();
        registry.set_current_state(LifecycleState::Destroyed);
        assert!(events.borrow().is_empty());
        assert_eq!(registry.current_state(), LifecycleState::Destroyed);
    }
}
