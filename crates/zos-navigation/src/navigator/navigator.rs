//! The navigator state machine
//!
//! Owns the backstack, resolves per-kind transitions on every change and
//! memoizes the node each entry resolves to.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::backstack::{Backstack, BackstackEntry};
use crate::config::NavigatorConfig;
use crate::error::NavigationResult;
use crate::key::NavigationKey;
use crate::node::{NavigationNode, NodeKind};
use crate::result::{DefaultResultManager, ResultManager, ResultSubscription};
use crate::transition::Transition;
use crate::types::EntryId;

/// Owner of one backstack
///
/// [`Navigator::set_backstack`] is the only mutation: every convenience
/// operation reads the current backstack, builds a new one and publishes it in
/// a single assignment.
pub struct Navigator<K> {
    pub(super) config: Rc<NavigatorConfig<K>>,
    pub(super) backstack: Backstack<K>,
    pub(super) revision: u64,
    pub(super) override_back_press: bool,
    pub(super) transitions: BTreeMap<NodeKind, Transition>,
    override_transitions: BTreeMap<NodeKind, Transition>,
    nodes: RefCell<HashMap<EntryId, Rc<NavigationNode>>>,
    results: Rc<dyn ResultManager>,
}

impl<K: NavigationKey> Navigator<K> {
    /// Create a navigator whose backstack holds fresh entries for `initial`
    ///
    /// Initialization resolves every transition to [`Transition::NONE`].
    pub fn new(config: Rc<NavigatorConfig<K>>, initial: impl IntoIterator<Item = K>) -> Self {
        let mut navigator = Self::empty(config);
        navigator.set_backstack(Backstack::from_keys(initial));
        navigator
    }

    pub(super) fn empty(config: Rc<NavigatorConfig<K>>) -> Self {
        Self {
            config,
            backstack: Backstack::empty(),
            revision: 0,
            override_back_press: false,
            transitions: BTreeMap::new(),
            override_transitions: BTreeMap::new(),
            nodes: RefCell::new(HashMap::new()),
            results: Rc::new(DefaultResultManager::new()),
        }
    }

    /// Replace the result manager
    pub fn with_result_manager(mut self, results: Rc<dyn ResultManager>) -> Self {
        self.results = results;
        self
    }

    /// The configuration this navigator resolves against
    pub fn config(&self) -> &Rc<NavigatorConfig<K>> {
        &self.config
    }

    /// The current backstack
    pub fn backstack(&self) -> &Backstack<K> {
        &self.backstack
    }

    /// Counter bumped by every published backstack
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Publish a new backstack
    ///
    /// The change counts as a pop when the new last entry (by id) was already
    /// somewhere in the previous backstack. For every supported node kind the
    /// last entry of that kind before and after the change decide the
    /// transition; a staged override wins over the configured resolvers.
    /// All staged overrides are discarded afterwards, used or not.
    ///
    /// # Panics
    ///
    /// Panics if an entry's key has no declared presentation.
    pub fn set_backstack(&mut self, entries: impl Into<Backstack<K>>) {
        let new = entries.into();
        warn_on_duplicate_ids(&new);

        let previous = &self.backstack;
        let is_pop = new
            .current()
            .is_some_and(|current| previous.contains_id(&current.id));

        let mut overrides = std::mem::take(&mut self.override_transitions);
        let mut transitions = BTreeMap::new();
        for kind in self.config.supported_nodes() {
            let previous_entry = self.last_of_kind(previous, kind);
            let new_entry = self.last_of_kind(&new, kind);
            let transition = match (previous_entry, new_entry) {
                (Some(previous_entry), Some(new_entry)) => match overrides.remove(kind) {
                    Some(transition) => transition,
                    None => self.config.resolve_transition(
                        kind,
                        previous_entry.key(),
                        new_entry.key(),
                        is_pop,
                    ),
                },
                _ => Transition::NONE,
            };
            trace!(%kind, ?transition, "resolved transition");
            transitions.insert(kind.clone(), transition);
        }

        self.transitions = transitions;
        self.backstack = new;
        self.revision += 1;
        debug!(
            entries = self.backstack.len(),
            is_pop,
            revision = self.revision,
            "published backstack"
        );
    }

    /// Last entry in `backstack` whose node is of `kind`
    pub fn last_of_kind<'a>(
        &self,
        backstack: &'a [BackstackEntry<K>],
        kind: &NodeKind,
    ) -> Option<&'a BackstackEntry<K>> {
        backstack
            .iter()
            .rev()
            .find(|entry| self.navigation_node(entry).is_kind(kind))
    }

    /// The node `entry` resolves to, memoized per entry id
    ///
    /// # Panics
    ///
    /// Panics if the key neither describes its own node nor has a declared
    /// presentation; that is an application wiring error with no sensible
    /// fallback.
    pub fn navigation_node(&self, entry: &BackstackEntry<K>) -> Rc<NavigationNode> {
        self.try_navigation_node(entry)
            .unwrap_or_else(|err| panic!("{} (key: {:?})", err, entry.key()))
    }

    /// Like [`Navigator::navigation_node`] but reports a missing presentation
    pub fn try_navigation_node(
        &self,
        entry: &BackstackEntry<K>,
    ) -> NavigationResult<Rc<NavigationNode>> {
        if let Some(node) = self.nodes.borrow().get(&entry.id) {
            return Ok(Rc::clone(node));
        }
        let node = Rc::new(self.config.build_node(entry.key())?);
        self.nodes
            .borrow_mut()
            .insert(entry.id.clone(), Rc::clone(&node));
        Ok(node)
    }

    /// Drop the memoized node of an entry that no longer exists
    ///
    /// Called by the lifecycle manager when it destroys the entry.
    pub fn release_node(&self, id: &EntryId) {
        self.nodes.borrow_mut().remove(id);
    }

    /// Keep only the memoized nodes whose entry id satisfies `keep`
    ///
    /// The lifecycle manager calls this after every disposal so that entries
    /// which left the backstack without ever being tracked drop their nodes
    /// too. A navigator driven without a manager calls it itself.
    pub fn retain_nodes(&self, mut keep: impl FnMut(&EntryId) -> bool) {
        let mut nodes = self.nodes.borrow_mut();
        let before = nodes.len();
        nodes.retain(|id, _| keep(id));
        let released = before - nodes.len();
        if released > 0 {
            trace!(released, "released memoized nodes");
        }
    }

    /// Number of memoized nodes
    pub fn cached_node_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Transition resolved for `kind` by the last backstack change
    pub fn transition(&self, kind: &NodeKind) -> Transition {
        self.transitions.get(kind).copied().unwrap_or(Transition::NONE)
    }

    /// All transitions resolved by the last backstack change
    pub fn transitions(&self) -> &BTreeMap<NodeKind, Transition> {
        &self.transitions
    }

    /// Stage a transition for `kind` that the next backstack change uses
    /// instead of the configured resolvers
    pub fn override_transition(&mut self, kind: NodeKind, transition: Transition) {
        self.override_transitions.insert(kind, transition);
    }

    /// Whether back presses are left to someone else
    pub fn override_back_press(&self) -> bool {
        self.override_back_press
    }

    /// Hand back presses to someone else (or take them back)
    pub fn set_override_back_press(&mut self, override_back_press: bool) {
        self.override_back_press = override_back_press;
    }

    /// Latest result published under `key`, if it is a `T`
    pub fn result<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.results.result(key)?.downcast::<T>().ok()
    }

    /// Publish a result under `key`
    pub fn set_result<T: Any + Send + Sync>(&self, key: &str, value: T) {
        self.results.set_result(key, Arc::new(value));
    }

    /// Forget the result under `key`
    pub fn clear_result(&self, key: &str) {
        self.results.clear_result(key);
    }

    /// Listen for results published from now on
    pub fn subscribe_results(&self) -> ResultSubscription {
        self.results.subscribe()
    }

    /// The result manager (for sharing with child navigators)
    pub fn result_manager(&self) -> &Rc<dyn ResultManager> {
        &self.results
    }
}

fn warn_on_duplicate_ids<K>(backstack: &Backstack<K>) {
    let mut seen = HashSet::with_capacity(backstack.len());
    for entry in backstack.iter() {
        if !seen.insert(&entry.id) {
            warn!(id = %entry.id, "backstack contains duplicate entry id");
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Navigator<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("backstack", &self.backstack)
            .field("revision", &self.revision)
            .field("override_back_press", &self.override_back_press)
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}
