//! Destination lifecycles
//!
//! Every backstack entry that is (or was recently) rendered owns a
//! [`LifecycleEntry`]: a lifecycle register, a saved-state slot and a
//! view-model store. The [`LifecycleManager`] creates entries on demand,
//! assigns their lifecycle ceilings through a [`RenderPolicy`] and tears them
//! down in two phases.
//!
//! # Architecture
//!
//! ```text
//! Navigator ──revision──▶ LifecycleManager ──▶ RenderPolicy
//!                               │                  │ render_group
//!                               │                  │ update_lifecycles
//!                               ▼                  ▼
//!                        LifecycleEntries ◀── ceilings (max_state)
//!                               ▲
//! HostLifecycle ──channel──────┘ host mirror (nav_host_state)
//! ```

mod entries;
mod entry;
mod host;
mod manager;
mod policy;
mod registry;
mod state;

pub use entries::LifecycleEntries;
pub use entry::{EntryPhase, LifecycleEntry};
pub use host::{HostLifecycle, HostSubscription};
pub use manager::{LifecycleManager, LifecycleManagerDeps, ManagerSnapshot};
pub use policy::{DefaultRenderGroup, DefaultRenderPolicy, RenderGroup, RenderPolicy};
pub use registry::LifecycleRegistry;
pub use state::{LifecycleEvent, LifecycleState};
