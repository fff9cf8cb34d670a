//! Easing curves for destination animations

use serde::{Deserialize, Serialize};

/// Timing curve applied to an animation's linear progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    /// No easing
    Linear,
    /// Cubic ease-in
    EaseIn,
    /// Cubic ease-out
    #[default]
    EaseOut,
    /// Cubic ease-in-out
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
