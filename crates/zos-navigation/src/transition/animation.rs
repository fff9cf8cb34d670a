//! Enter/exit animation descriptors
//!
//! These only *describe* an animation. Rendering code reads the effect and
//! samples [`Animation::progress`] each frame.

use serde::{Deserialize, Serialize};

use super::easing::Easing;

/// Duration of the default crossfade in milliseconds
pub const DEFAULT_TRANSITION_DURATION_MS: f32 = 250.0;

/// Screen edge a slide animation moves from or towards
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    /// Leading edge
    Start,
    /// Trailing edge
    End,
    /// Top edge
    Top,
    /// Bottom edge
    Bottom,
}

/// Visual effect of an animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AnimationEffect {
    /// Appear or disappear instantly
    None,
    /// Opacity fade
    Fade,
    /// Slide from (enter) or towards (exit) an edge
    Slide(Edge),
    /// Scale from (enter) or towards (exit) the given factor
    Scale {
        /// Scale factor at the hidden end of the animation
        from: f32,
    },
}

/// One half of a transition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// What is animated
    pub effect: AnimationEffect,
    /// Duration in ms
    pub duration_ms: f32,
    /// Timing curve
    pub easing: Easing,
}

impl Default for Animation {
    fn default() -> Self {
        Self::NONE
    }
}

impl Animation {
    /// An instant animation
    pub const NONE: Self = Self {
        effect: AnimationEffect::None,
        duration_ms: 0.0,
        easing: Easing::Linear,
    };

    /// Create an animation with the default ease-out curve
    pub fn new(effect: AnimationEffect, duration_ms: f32) -> Self {
        Self {
            effect,
            duration_ms,
            easing: Easing::EaseOut,
        }
    }

    /// Fade over `duration_ms`
    pub fn fade(duration_ms: f32) -> Self {
        Self::new(AnimationEffect::Fade, duration_ms)
    }

    /// Slide relative to `edge` over `duration_ms`
    pub fn slide(edge: Edge, duration_ms: f32) -> Self {
        Self::new(AnimationEffect::Slide(edge), duration_ms)
    }

    /// Replace the timing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Whether this animation does nothing
    pub fn is_none(&self) -> bool {
        matches!(self.effect, AnimationEffect::None) || self.duration_ms <= 0.0
    }

    /// Eased progress (0.0 to 1.0) after `elapsed_ms`
    pub fn progress(&self, elapsed_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let t = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        self.easing.apply(t)
    }

    /// Check if the animation is complete
    pub fn is_complete(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= self.duration_ms
    }
}
