//! Immutable navigator configuration

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{NavigationError, NavigationResult};
use crate::key::NavigationKey;
use crate::node::{NavigationNode, NodeKind};
use crate::transition::{Transition, TransitionResolver};
use crate::types::KeyType;

use super::builder::NavigatorConfigBuilder;

/// Builds the node for a key of one declared key type
pub type PresentationFn<K> = Rc<dyn Fn(&K) -> NavigationNode>;

/// Lookup tables shared by every navigator built from them
///
/// Built once through [`NavigatorConfig::builder`] and never mutated
/// afterwards.
pub struct NavigatorConfig<K> {
    pub(super) presentations: HashMap<KeyType, PresentationFn<K>>,
    pub(super) key_transitions: HashMap<KeyType, TransitionResolver<K>>,
    pub(super) node_transitions: HashMap<NodeKind, TransitionResolver<K>>,
    pub(super) default_transition: TransitionResolver<K>,
    pub(super) supported_nodes: Vec<NodeKind>,
}

impl<K: NavigationKey> NavigatorConfig<K> {
    /// Start declaring a configuration
    pub fn builder() -> NavigatorConfigBuilder<K> {
        NavigatorConfigBuilder::new()
    }

    /// Node kinds the navigator resolves transitions for, in declaration order
    pub fn supported_nodes(&self) -> &[NodeKind] {
        &self.supported_nodes
    }

    /// Whether a presentation was declared for the key type
    pub fn has_presentation(&self, key_type: KeyType) -> bool {
        self.presentations.contains_key(&key_type)
    }

    /// Build the node for `key`
    ///
    /// Keys that describe their own node bypass the presentation table.
    pub fn build_node(&self, key: &K) -> NavigationResult<NavigationNode> {
        if let Some(node) = key.navigation_node() {
            return Ok(node);
        }
        let key_type = key.key_type();
        self.presentations
            .get(&key_type)
            .map(|present| present(key))
            .ok_or(NavigationError::MissingPresentation { key_type })
    }

    /// Resolve the transition for `kind` between two keys
    ///
    /// A resolver registered for the new key's type wins over one registered
    /// for the node kind, which wins over the default.
    pub fn resolve_transition(
        &self,
        kind: &NodeKind,
        previous: &K,
        new: &K,
        is_pop: bool,
    ) -> Transition {
        let resolver = self
            .key_transitions
            .get(&new.key_type())
            .or_else(|| self.node_transitions.get(kind))
            .unwrap_or(&self.default_transition);
        resolver(previous, new, is_pop)
    }
}

impl<K> fmt::Debug for NavigatorConfig<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut presentations: Vec<_> = self.presentations.keys().collect();
        presentations.sort();
        let mut key_transitions: Vec<_> = self.key_transitions.keys().collect();
        key_transitions.sort();
        let mut node_transitions: Vec<_> = self.node_transitions.keys().collect();
        node_transitions.sort();
        f.debug_struct("NavigatorConfig")
            .field("presentations", &presentations)
            .field("key_transitions", &key_transitions)
            .field("node_transitions", &node_transitions)
            .field("supported_nodes", &self.supported_nodes)
            .finish_non_exhaustive()
    }
}
