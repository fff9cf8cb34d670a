//! Resolved transitions and their resolvers

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::animation::{Animation, Edge, DEFAULT_TRANSITION_DURATION_MS};

/// Enter and exit animations for one presentation kind
///
/// The entering destination plays `enter` while the leaving one plays `exit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Played by the destination becoming visible
    pub enter: Animation,
    /// Played by the destination going away
    pub exit: Animation,
}

impl Transition {
    /// No animation in either direction
    pub const NONE: Self = Self {
        enter: Animation::NONE,
        exit: Animation::NONE,
    };

    /// Create a transition from its two halves
    pub fn new(enter: Animation, exit: Animation) -> Self {
        Self { enter, exit }
    }

    /// Fade in over fade out with the default duration
    pub fn crossfade() -> Self {
        Self::new(
            Animation::fade(DEFAULT_TRANSITION_DURATION_MS),
            Animation::fade(DEFAULT_TRANSITION_DURATION_MS),
        )
    }

    /// Whether neither half animates
    pub fn is_none(&self) -> bool {
        self.enter.is_none() && self.exit.is_none()
    }
}

/// Computes a transition from `(previous_key, new_key, is_pop)`
pub type TransitionResolver<K> = Rc<dyn Fn(&K, &K, bool) -> Transition>;

/// A forward transition together with the one used when popping
///
/// Most resolvers are a fixed pair; [`TransitionPair::into_resolver`] turns
/// the pair into a resolver that picks the half matching `is_pop`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionPair {
    /// Used when a new destination is pushed
    pub forward: Transition,
    /// Used when returning to an existing destination
    pub pop: Transition,
}

impl TransitionPair {
    /// Create a pair
    pub fn new(forward: Transition, pop: Transition) -> Self {
        Self { forward, pop }
    }

    /// The same transition in both directions
    pub fn symmetric(transition: Transition) -> Self {
        Self::new(transition, transition)
    }

    /// Horizontal slide: push enters from the end, pop enters from the start
    pub fn horizontal_slide(duration_ms: f32) -> Self {
        Self::new(
            Transition::new(
                Animation::slide(Edge::End, duration_ms),
                Animation::slide(Edge::Start, duration_ms),
            ),
            Transition::new(
                Animation::slide(Edge::Start, duration_ms),
                Animation::slide(Edge::End, duration_ms),
            ),
        )
    }

    /// Pick the half for a push or a pop
    pub fn select(&self, is_pop: bool) -> Transition {
        if is_pop {
            self.pop
        } else {
            self.forward
        }
    }

    /// Resolver that ignores the keys and selects by `is_pop`
    pub fn into_resolver<K>(self) -> TransitionResolver<K> {
        Rc::new(move |_, _, is_pop| self.select(is_pop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_by_direction() {
        let pair = TransitionPair::horizontal_slide(300.0);
        assert_eq!(pair.select(false), pair.forward);
        assert_eq!(pair.select(true), pair.pop);
        assert_ne!(pair.forward, pair.pop);
    }

    #[test]
    fn test_resolver_uses_pop_flag() {
        let pair = TransitionPair::new(Transition::crossfade(), Transition::NONE);
        let resolver = pair.into_resolver::<u32>();
        assert_eq!(resolver(&1, &2, false), Transition::crossfade());
        assert_eq!(resolver(&1, &2, true), Transition::NONE);
    }

    #[test]
    fn test_none() {
        assert!(Transition::NONE.is_none());
        assert!(!Transition::crossfade().is_none());
    }
}
