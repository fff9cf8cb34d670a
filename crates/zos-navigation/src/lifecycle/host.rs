//! Host lifecycle signal
//!
//! The host (window, app shell) owns one lifecycle state that only it moves.
//! Interested parties subscribe and receive every subsequent state over a
//! channel; the lifecycle manager drains its subscription before each
//! operation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam::channel::{Receiver, Sender};

use super::state::LifecycleState;

/// Cloneable handle to a host's lifecycle state
#[derive(Clone)]
pub struct HostLifecycle {
    inner: Arc<Mutex<HostState>>,
}

struct HostState {
    state: LifecycleState,
    subscribers: BTreeMap<u64, Sender<LifecycleState>>,
    next_subscriber_id: u64,
}

impl HostLifecycle {
    /// A host currently in `state`
    pub fn new(state: LifecycleState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HostState {
                state,
                subscribers: BTreeMap::new(),
                next_subscriber_id: 0,
            })),
        }
    }

    /// The host's current state
    pub fn current_state(&self) -> LifecycleState {
        self.lock_state().state
    }

    /// Move the host to `state` and notify subscribers
    ///
    /// A destroyed host stays destroyed; repeating the current state is a
    /// no-op.
    pub fn set_state(&self, state: LifecycleState) {
        let mut host = self.lock_state();
        if host.state == state || host.state == LifecycleState::Destroyed {
            return;
        }
        host.state = state;
        host.subscribers
            .retain(|_, sender| sender.send(state).is_ok());
    }

    /// Receive every state set from now on
    pub fn subscribe(&self) -> HostSubscription {
        let (sender, receiver) = crossbeam::channel::unbounded();
        let mut host = self.lock_state();
        let id = host.next_subscriber_id;
        host.next_subscriber_id = host.next_subscriber_id.saturating_add(1);
        host.subscribers.insert(id, sender);
        HostSubscription {
            id,
            receiver,
            host: self.clone(),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.lock_state().subscribers.len()
    }

    fn unsubscribe(&self, id: u64) {
        self.lock_state().subscribers.remove(&id);
    }

    fn lock_state(&self) -> MutexGuard<'_, HostState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for HostLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = self.lock_state();
        f.debug_struct("HostLifecycle")
            .field("state", &host.state)
            .field("subscribers", &host.subscribers.len())
            .finish()
    }
}

/// A subscription to a [`HostLifecycle`]
pub struct HostSubscription {
    id: u64,
    receiver: Receiver<LifecycleState>,
    host: HostLifecycle,
}

impl HostSubscription {
    /// States received since the last drain, oldest first
    pub fn drain(&self) -> Vec<LifecycleState> {
        self.receiver.try_iter().collect()
    }

    /// Detach from the host
    pub fn cancel(self) {
        self.host.unsubscribe(self.id);
    }
}

impl fmt::Debug for HostSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostSubscription")
            .field("id", &self.id)
            .field("pending", &self.receiver.len())
            .finish()
    }
}
