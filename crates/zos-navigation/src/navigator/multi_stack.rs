//! Multi-stack navigation
//!
//! Tab-style navigation keeps one independent backstack per declared stack.
//! Each stack is a full [`Navigator`] rooted at its stack key; one stack is
//! active at a time and all of them share a single result manager.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::NavigatorConfig;
use crate::error::{NavigationError, NavigationResult};
use crate::key::NavigationKey;
use crate::result::{DefaultResultManager, ResultManager};

use super::navigator::Navigator;
use super::state::NavigatorState;

/// One backstack per declared stack key
#[derive(Debug)]
pub struct MultiStackNavigator<K> {
    stacks: Vec<Stack<K>>,
    initial: usize,
    active: usize,
}

#[derive(Debug)]
struct Stack<K> {
    key: K,
    navigator: Navigator<K>,
}

/// Saved state of one stack
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackState<K> {
    /// Stack key
    pub key: K,
    /// The stack's navigator
    pub navigator: NavigatorState<K>,
}

/// Serializable snapshot of a [`MultiStackNavigator`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiStackState<K> {
    /// Stacks in declaration order
    pub stacks: Vec<StackState<K>>,
    /// Index of the initial stack
    pub initial: usize,
    /// Index of the active stack
    pub active: usize,
}

impl<K: NavigationKey> MultiStackNavigator<K> {
    /// Declare the stacks and start on `initial`
    ///
    /// Fails immediately if no stacks are declared or `initial` is not one of
    /// them.
    pub fn new(
        config: Rc<NavigatorConfig<K>>,
        stack_keys: impl IntoIterator<Item = K>,
        initial: &K,
    ) -> NavigationResult<Self> {
        let results: Rc<dyn ResultManager> = Rc::new(DefaultResultManager::new());
        let stacks: Vec<Stack<K>> = stack_keys
            .into_iter()
            .map(|key| Stack {
                navigator: Navigator::new(Rc::clone(&config), [key.clone()])
                    .with_result_manager(Rc::clone(&results)),
                key,
            })
            .collect();
        if stacks.is_empty() {
            return Err(NavigationError::InvalidOperation {
                op: "multi_stack_navigator",
                reason: "at least one stack is required",
            });
        }

        let initial = stacks
            .iter()
            .position(|stack| &stack.key == initial)
            .ok_or_else(|| NavigationError::InvalidInitialStack {
                reason: format!("{:?} is not one of the declared stacks", initial),
            })?;

        Ok(Self {
            stacks,
            initial,
            active: initial,
        })
    }

    /// Keys of every declared stack
    pub fn stack_keys(&self) -> impl Iterator<Item = &K> {
        self.stacks.iter().map(|stack| &stack.key)
    }

    /// Key of the initial stack
    pub fn initial_key(&self) -> &K {
        &self.stacks[self.initial].key
    }

    /// Key of the active stack
    pub fn active_key(&self) -> &K {
        &self.stacks[self.active].key
    }

    /// The active stack's navigator
    pub fn active(&self) -> &Navigator<K> {
        &self.stacks[self.active].navigator
    }

    /// The active stack's navigator, mutably
    pub fn active_mut(&mut self) -> &mut Navigator<K> {
        &mut self.stacks[self.active].navigator
    }

    /// Navigator of the stack declared with `key`
    pub fn stack(&self, key: &K) -> Option<&Navigator<K>> {
        self.index_of(key).map(|index| &self.stacks[index].navigator)
    }

    /// Navigator of the stack declared with `key`, mutably
    pub fn stack_mut(&mut self, key: &K) -> Option<&mut Navigator<K>> {
        self.index_of(key)
            .map(move |index| &mut self.stacks[index].navigator)
    }

    /// Make the stack declared with `key` active
    ///
    /// Returns false if no such stack exists.
    pub fn set_active(&mut self, key: &K) -> bool {
        match self.index_of(key) {
            Some(index) => {
                if index != self.active {
                    debug!(from = self.active, to = index, "switched active stack");
                    self.active = index;
                }
                true
            }
            None => false,
        }
    }

    /// Pop the active stack, falling back to the initial stack at its root
    pub fn pop(&mut self) -> bool {
        if self.active_mut().pop() {
            return true;
        }
        if self.active != self.initial {
            self.active = self.initial;
            return true;
        }
        false
    }

    /// Capture every stack
    pub fn save_state(&self) -> MultiStackState<K> {
        MultiStackState {
            stacks: self
                .stacks
                .iter()
                .map(|stack| StackState {
                    key: stack.key.clone(),
                    navigator: stack.navigator.save_state(),
                })
                .collect(),
            initial: self.initial,
            active: self.active,
        }
    }

    /// Rebuild from a snapshot, validating the stack indices
    pub fn restore(
        config: Rc<NavigatorConfig<K>>,
        state: MultiStackState<K>,
    ) -> NavigationResult<Self> {
        let count = state.stacks.len();
        if state.initial >= count {
            return Err(NavigationError::InvalidInitialStack {
                reason: format!("initial stack {} of {} stacks", state.initial, count),
            });
        }
        if state.active >= count {
            return Err(NavigationError::InvalidOperation {
                op: "multi_stack_restore",
                reason: "active stack index out of range",
            });
        }

        let results: Rc<dyn ResultManager> = Rc::new(DefaultResultManager::new());
        let stacks = state
            .stacks
            .into_iter()
            .map(|saved| Stack {
                key: saved.key,
                navigator: Navigator::restore(Rc::clone(&config), saved.navigator)
                    .with_result_manager(Rc::clone(&results)),
            })
            .collect();

        Ok(Self {
            stacks,
            initial: state.initial,
            active: state.active,
        })
    }

    fn index_of(&self, key: &K) -> Option<usize> {
        self.stacks.iter().position(|stack| &stack.key == key)
    }
}
