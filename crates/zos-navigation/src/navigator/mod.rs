//! Navigator: backstack ownership, transition resolution and persistence
//!
//! - [`Navigator`]: one backstack and its per-kind transitions
//! - [`MultiStackNavigator`]: one navigator per tab-style stack
//! - [`NavigatorState`] / [`MultiStackState`]: serializable snapshots

mod multi_stack;
#[allow(clippy::module_inception)]
mod navigator;
mod operations;
mod state;

pub use multi_stack::{MultiStackNavigator, MultiStackState, StackState};
pub use navigator::Navigator;
pub use state::{KindTransition, NavigatorState};
