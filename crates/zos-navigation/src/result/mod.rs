//! Result passing between destinations
//!
//! A destination publishes a typed value under a string key; whoever asked for
//! it either reads the latest value or listens for new ones. Listening is a
//! hot stream: a subscription only sees results set after it was created.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam::channel::{Receiver, RecvError, Sender};

/// A type-erased result value
pub type ResultValue = Arc<dyn Any + Send + Sync>;

/// One published result
#[derive(Clone)]
pub struct ResultEvent {
    /// Key the result was published under
    pub key: String,
    /// The value
    pub value: ResultValue,
}

impl ResultEvent {
    /// The value as `T`, if it is one
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }
}

impl fmt::Debug for ResultEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultEvent")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Receives every result published after it was created
#[derive(Debug)]
pub struct ResultSubscription {
    receiver: Receiver<ResultEvent>,
}

impl ResultSubscription {
    /// Wrap a channel receiver (for custom [`ResultManager`] implementations)
    pub fn new(receiver: Receiver<ResultEvent>) -> Self {
        Self { receiver }
    }

    /// Block until the next result arrives
    pub fn recv(&self) -> Result<ResultEvent, RecvError> {
        self.receiver.recv()
    }

    /// Next pending result, if any
    pub fn try_recv(&self) -> Option<ResultEvent> {
        self.receiver.try_recv().ok()
    }

    /// All pending results, oldest first
    pub fn drain(&self) -> Vec<ResultEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Storage and broadcast of results
///
/// Implementations use interior mutability; the navigator only holds a shared
/// reference.
pub trait ResultManager {
    /// Latest value published under `key`
    fn result(&self, key: &str) -> Option<ResultValue>;

    /// Publish `value` under `key`, replacing any previous value
    fn set_result(&self, key: &str, value: ResultValue);

    /// Forget the value under `key`
    fn clear_result(&self, key: &str);

    /// Listen for results published from now on
    fn subscribe(&self) -> ResultSubscription;
}

/// In-memory result store with channel fan-out
#[derive(Default)]
pub struct DefaultResultManager {
    inner: Mutex<ResultState>,
}

#[derive(Default)]
struct ResultState {
    results: HashMap<String, ResultValue>,
    subscribers: Vec<Sender<ResultEvent>>,
}

impl DefaultResultManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions seen at the last publication
    pub fn subscriber_count(&self) -> usize {
        self.lock_state().subscribers.len()
    }

    fn lock_state(&self) -> MutexGuard<'_, ResultState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResultManager for DefaultResultManager {
    fn result(&self, key: &str) -> Option<ResultValue> {
        self.lock_state().results.get(key).cloned()
    }

    fn set_result(&self, key: &str, value: ResultValue) {
        let mut state = self.lock_state();
        state.results.insert(key.to_string(), Arc::clone(&value));

        let event = ResultEvent {
            key: key.to_string(),
            value,
        };
        // Dropped subscriptions are pruned here
        state
            .subscribers
            .retain(|sender| sender.send(event.clone()).is_ok());
    }

    fn clear_result(&self, key: &str) {
        self.lock_state().results.remove(key);
    }

    fn subscribe(&self) -> ResultSubscription {
        let (sender, receiver) = crossbeam::channel::unbounded();
        self.lock_state().subscribers.push(sender);
        ResultSubscription::new(receiver)
    }
}

impl fmt::Debug for DefaultResultManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        f.debug_struct("DefaultResultManager")
            .field("results", &state.results.len())
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}
