//! Navigation Engine for Zero OS
//!
//! This crate provides the backstack and lifecycle core used by Zero OS apps:
//! - Backstack ownership with atomic, whole-stack updates
//! - Per-presentation transition resolution (push vs. pop, one-shot overrides)
//! - Typed result passing between destinations
//! - Lifecycle, saved state and view-model scoping per backstack entry
//! - Save/restore across process death
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`backstack`]: Entries and immutable backstack snapshots
//! - [`node`]: Presentation kinds (screen, dialog, bottom sheet, custom)
//! - [`transition`]: Animation descriptors and transition pairs
//! - [`config`]: Declarative presentation and transition tables
//! - [`navigator`]: The backstack state machine and its operations
//! - [`result`]: Hot result broadcast between destinations
//! - [`lifecycle`]: Render groups, lifecycle ceilings and teardown
//! - [`persistence`]: Saved-state, view-model and UI-state substrate
//!
//! ## Example
//!
//! ```rust
//! use zos_navigation::{
//!     DialogOptions, KeyType, LifecycleManager, LifecycleManagerDeps, LifecycleState,
//!     NavigationKey, Navigator, NavigatorConfig,
//! };
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Route {
//!     Home,
//!     Confirm,
//! }
//!
//! impl NavigationKey for Route {
//!     fn key_type(&self) -> KeyType {
//!         match self {
//!             Route::Home => KeyType::new("Home"),
//!             Route::Confirm => KeyType::new("Confirm"),
//!         }
//!     }
//! }
//!
//! let config = NavigatorConfig::<Route>::builder()
//!     .screen(KeyType::new("Home"))
//!     .dialog(KeyType::new("Confirm"), DialogOptions::default())
//!     .build();
//! let mut navigator = Navigator::new(config, [Route::Home]);
//! let mut lifecycles = LifecycleManager::new(LifecycleManagerDeps::default());
//!
//! navigator.push(Route::Confirm);
//! lifecycles.render_group(&navigator);
//!
//! let home = &navigator.backstack()[0].id;
//! assert_eq!(
//!     lifecycles.entry(home).unwrap().lifecycle_state(),
//!     LifecycleState::Started
//! );
//! assert!(navigator.pop());
//! ```
//!
//! ## Design Principles
//!
//! 1. **Single mutation point**: every operation publishes a whole new backstack
//! 2. **Pull-based derivation**: render groups are recomputed on read when the
//!    navigator's revision moved
//! 3. **Two-phase teardown**: entries leave the backstack first and are
//!    destroyed only once the rendering layer disposed them
//! 4. **Pluggable seams**: render policy, result manager and persistence are traits

pub mod backstack;
pub mod config;
pub mod error;
pub mod key;
pub mod lifecycle;
pub mod navigator;
pub mod node;
pub mod persistence;
pub mod result;
pub mod transition;
pub mod types;

// Re-export core types for convenience
pub use backstack::{Backstack, BackstackEntry};
pub use config::{NavigatorConfig, NavigatorConfigBuilder};
pub use error::{NavigationError, NavigationResult};
pub use key::NavigationKey;
pub use lifecycle::{
    DefaultRenderGroup, DefaultRenderPolicy, EntryPhase, HostLifecycle, LifecycleEntry,
    LifecycleEvent, LifecycleManager, LifecycleManagerDeps, LifecycleState, ManagerSnapshot,
    RenderGroup, RenderPolicy,
};
pub use navigator::{MultiStackNavigator, MultiStackState, Navigator, NavigatorState};
pub use node::{
    BottomSheetOptions, DialogOptions, NavigationNode, NodeKind, SecureFlagPolicy, SheetValue,
};
pub use persistence::{
    Bundle, MemorySaveableStateHolder, MemorySavedStateRegistry, MemoryViewModelStores,
    SaveableStateHolder, SavedStateRegistry, ViewModel, ViewModelStore, ViewModelStoreProvider,
};
pub use result::{DefaultResultManager, ResultManager, ResultSubscription};
pub use transition::{Animation, Easing, Transition, TransitionPair};
pub use types::{EntryId, KeyType, ManagerId};
