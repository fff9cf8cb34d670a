//! Navigator persistence
//!
//! A navigator is saved as its backstack (keys and entry ids), the transitions
//! resolved by its last change and its back-press override flag. Restoring
//! reinstates all three verbatim without re-running transition resolution.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backstack::Backstack;
use crate::config::NavigatorConfig;
use crate::error::NavigationResult;
use crate::key::NavigationKey;
use crate::node::NodeKind;
use crate::transition::Transition;

use super::navigator::Navigator;

/// Transition resolved for one node kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KindTransition {
    /// The node kind
    pub kind: NodeKind,
    /// Its transition
    pub transition: Transition,
}

/// Serializable snapshot of a [`Navigator`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigatorState<K> {
    /// Backstack, root first
    pub backstack: Backstack<K>,
    /// Transitions resolved by the last change
    #[serde(default)]
    pub transitions: Vec<KindTransition>,
    /// Back-press override flag
    #[serde(default)]
    pub override_back_press: bool,
}

impl<K: NavigationKey> Navigator<K> {
    /// Capture the navigator's durable state
    pub fn save_state(&self) -> NavigatorState<K> {
        NavigatorState {
            backstack: self.backstack.clone(),
            transitions: self
                .transitions
                .iter()
                .map(|(kind, transition)| KindTransition {
                    kind: kind.clone(),
                    transition: *transition,
                })
                .collect(),
            override_back_press: self.override_back_press,
        }
    }

    /// Rebuild a navigator from a saved snapshot
    pub fn restore(config: Rc<NavigatorConfig<K>>, state: NavigatorState<K>) -> Self {
        let mut navigator = Self::empty(config);
        navigator.backstack = state.backstack;
        navigator.transitions = state
            .transitions
            .into_iter()
            .map(|saved| (saved.kind, saved.transition))
            .collect();
        navigator.override_back_press = state.override_back_press;
        navigator.revision = 1;
        debug!(
            entries = navigator.backstack.len(),
            "restored navigator"
        );
        navigator
    }
}

impl<K: NavigationKey + Serialize> Navigator<K> {
    /// Save as JSON
    pub fn to_json(&self) -> NavigationResult<String> {
        Ok(serde_json::to_string(&self.save_state())?)
    }
}

impl<K: NavigationKey + DeserializeOwned> Navigator<K> {
    /// Restore from JSON produced by [`Navigator::to_json`]
    pub fn from_json(config: Rc<NavigatorConfig<K>>, json: &str) -> NavigationResult<Self> {
        let state: NavigatorState<K> = serde_json::from_str(json)?;
        Ok(Self::restore(config, state))
    }
}
