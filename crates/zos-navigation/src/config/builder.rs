//! Declarative configuration builder

use std::collections::HashMap;
use std::rc::Rc;

use crate::key::NavigationKey;
use crate::node::{BottomSheetOptions, CustomNode, DialogOptions, NavigationNode, NodeKind};
use crate::transition::{Transition, TransitionPair, TransitionResolver};
use crate::types::KeyType;

use super::config::{NavigatorConfig, PresentationFn};

/// Builder for [`NavigatorConfig`]
///
/// ```rust
/// use zos_navigation::{
///     DialogOptions, KeyType, NavigationKey, NavigatorConfig, NodeKind, TransitionPair,
/// };
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Route {
///     Home,
///     Confirm,
/// }
///
/// const HOME: KeyType = KeyType::new("Home");
/// const CONFIRM: KeyType = KeyType::new("Confirm");
///
/// impl NavigationKey for Route {
///     fn key_type(&self) -> KeyType {
///         match self {
///             Route::Home => HOME,
///             Route::Confirm => CONFIRM,
///         }
///     }
/// }
///
/// let config = NavigatorConfig::<Route>::builder()
///     .screen(HOME)
///     .dialog(CONFIRM, DialogOptions::default())
///     .node_transition_pair(NodeKind::Screen, TransitionPair::horizontal_slide(300.0))
///     .build();
///
/// assert!(config.has_presentation(CONFIRM));
/// ```
pub struct NavigatorConfigBuilder<K> {
    presentations: HashMap<KeyType, PresentationFn<K>>,
    key_transitions: HashMap<KeyType, TransitionResolver<K>>,
    node_transitions: HashMap<NodeKind, TransitionResolver<K>>,
    default_transition: Option<TransitionResolver<K>>,
    supported_nodes: Vec<NodeKind>,
}

impl<K: NavigationKey> Default for NavigatorConfigBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NavigationKey> NavigatorConfigBuilder<K> {
    /// Empty builder tracking the built-in node kinds
    pub fn new() -> Self {
        Self {
            presentations: HashMap::new(),
            key_transitions: HashMap::new(),
            node_transitions: HashMap::new(),
            default_transition: None,
            supported_nodes: NodeKind::built_in(),
        }
    }

    /// Declare how keys of `key_type` are presented
    pub fn presentation(
        mut self,
        key_type: KeyType,
        present: impl Fn(&K) -> NavigationNode + 'static,
    ) -> Self {
        self.presentations.insert(key_type, Rc::new(present));
        self
    }

    /// Present keys of `key_type` as full screens
    pub fn screen(self, key_type: KeyType) -> Self {
        self.presentation(key_type, |_| NavigationNode::Screen)
    }

    /// Present keys of `key_type` as dialogs
    pub fn dialog(self, key_type: KeyType, options: DialogOptions) -> Self {
        self.presentation(key_type, move |_| NavigationNode::Dialog(options))
    }

    /// Present keys of `key_type` as bottom sheets
    pub fn bottom_sheet(self, key_type: KeyType, options: BottomSheetOptions) -> Self {
        self.presentation(key_type, move |_| {
            NavigationNode::bottom_sheet(options.clone())
        })
    }

    /// Present keys of `key_type` with an application-defined kind
    ///
    /// The kind is also added to the supported node kinds.
    pub fn custom(self, key_type: KeyType, name: &'static str) -> Self {
        self.supported_node(NodeKind::custom(name))
            .presentation(key_type, move |_| {
                NavigationNode::Custom(CustomNode::new(name))
            })
    }

    /// Resolver used when the new destination's key is of `key_type`
    pub fn key_transition(
        mut self,
        key_type: KeyType,
        resolve: impl Fn(&K, &K, bool) -> Transition + 'static,
    ) -> Self {
        self.key_transitions.insert(key_type, Rc::new(resolve));
        self
    }

    /// Fixed forward/pop pair used when the new key is of `key_type`
    pub fn key_transition_pair(mut self, key_type: KeyType, pair: TransitionPair) -> Self {
        self.key_transitions.insert(key_type, pair.into_resolver());
        self
    }

    /// Resolver used for a node kind when no key-type resolver matches
    pub fn node_transition(
        mut self,
        kind: NodeKind,
        resolve: impl Fn(&K, &K, bool) -> Transition + 'static,
    ) -> Self {
        self.node_transitions.insert(kind, Rc::new(resolve));
        self
    }

    /// Fixed forward/pop pair for a node kind
    pub fn node_transition_pair(mut self, kind: NodeKind, pair: TransitionPair) -> Self {
        self.node_transitions.insert(kind, pair.into_resolver());
        self
    }

    /// Fallback resolver
    pub fn default_transition(
        mut self,
        resolve: impl Fn(&K, &K, bool) -> Transition + 'static,
    ) -> Self {
        self.default_transition = Some(Rc::new(resolve));
        self
    }

    /// Fixed fallback pair
    pub fn default_transition_pair(mut self, pair: TransitionPair) -> Self {
        self.default_transition = Some(pair.into_resolver());
        self
    }

    /// Track transitions for an additional node kind
    pub fn supported_node(mut self, kind: NodeKind) -> Self {
        if !self.supported_nodes.contains(&kind) {
            self.supported_nodes.push(kind);
        }
        self
    }

    /// Replace the tracked node kinds entirely
    pub fn supported_nodes(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        self.supported_nodes.clear();
        for kind in kinds {
            self = self.supported_node(kind);
        }
        self
    }

    /// Freeze the configuration
    pub fn build(self) -> Rc<NavigatorConfig<K>> {
        Rc::new(NavigatorConfig {
            presentations: self.presentations,
            key_transitions: self.key_transitions,
            node_transitions: self.node_transitions,
            default_transition: self
                .default_transition
                .unwrap_or_else(|| TransitionPair::symmetric(Transition::crossfade()).into_resolver()),
            supported_nodes: self.supported_nodes,
        })
    }
}
