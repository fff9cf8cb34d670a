//! Presentation kinds

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The presentation kind of a [`NavigationNode`](super::NavigationNode)
///
/// Transitions are resolved and cached per kind, and the default render policy
/// assigns one slot per built-in kind.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Full-screen destination
    Screen,
    /// Dialog drawn above the current screen
    Dialog,
    /// Bottom sheet drawn above the current screen
    BottomSheet,
    /// Application-defined presentation kind
    Custom(Cow<'static, str>),
}

impl NodeKind {
    /// Create a custom kind from a static name
    pub const fn custom(name: &'static str) -> Self {
        Self::Custom(Cow::Borrowed(name))
    }

    /// The kinds every navigator tracks transitions for by default
    pub fn built_in() -> Vec<Self> {
        vec![Self::Screen, Self::Dialog, Self::BottomSheet]
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Screen => f.write_str("screen"),
            Self::Dialog => f.write_str("dialog"),
            Self::BottomSheet => f.write_str("bottom-sheet"),
            Self::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}
