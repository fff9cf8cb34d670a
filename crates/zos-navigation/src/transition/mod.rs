//! Transition descriptors and resolution inputs
//!
//! The navigator resolves one [`Transition`] per supported node kind on every
//! backstack change. Rendering code reads it and drives the actual animation.

mod animation;
mod easing;
#[allow(clippy::module_inception)]
mod transition;

pub use animation::{Animation, AnimationEffect, Edge, DEFAULT_TRANSITION_DURATION_MS};
pub use easing::Easing;
pub use transition::{Transition, TransitionPair, TransitionResolver};
