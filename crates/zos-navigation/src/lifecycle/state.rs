//! Lifecycle states and the events between them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a host or entry
///
/// States are ordered so that ceilings combine with `min`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Terminal; no further events
    Destroyed,
    /// Constructed but not yet created
    Initialized,
    /// Created, not visible
    Created,
    /// Visible, not interactive
    Started,
    /// Visible and interactive
    Resumed,
}

impl LifecycleState {
    /// Whether this state is at least `other`
    pub fn is_at_least(self, other: LifecycleState) -> bool {
        self >= other
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Destroyed => "DESTROYED",
            Self::Initialized => "INITIALIZED",
            Self::Created => "CREATED",
            Self::Started => "STARTED",
            Self::Resumed => "RESUMED",
        };
        f.write_str(name)
    }
}

/// A single step between two adjacent lifecycle states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    OnCreate,
    OnStart,
    OnResume,
    OnPause,
    OnStop,
    OnDestroy,
}

impl LifecycleEvent {
    /// The step up from `state`, if there is one
    pub fn up_from(state: LifecycleState) -> Option<Self> {
        match state {
            LifecycleState::Initialized => Some(Self::OnCreate),
            LifecycleState::Created => Some(Self::OnStart),
            LifecycleState::Started => Some(Self::OnResume),
            LifecycleState::Resumed | LifecycleState::Destroyed => None,
        }
    }

    /// The step down from `state`, if there is one
    pub fn down_from(state: LifecycleState) -> Option<Self> {
        match state {
            LifecycleState::Resumed => Some(Self::OnPause),
            LifecycleState::Started => Some(Self::OnStop),
            LifecycleState::Created => Some(Self::OnDestroy),
            LifecycleState::Initialized | LifecycleState::Destroyed => None,
        }
    }

    /// State reached after this event
    pub fn target_state(self) -> LifecycleState {
        match self {
            Self::OnCreate | Self::OnStop => LifecycleState::Created,
            Self::OnStart | Self::OnPause => LifecycleState::Started,
            Self::OnResume => LifecycleState::Resumed,
            Self::OnDestroy => LifecycleState::Destroyed,
        }
    }
}
