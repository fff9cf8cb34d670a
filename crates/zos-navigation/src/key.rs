//! Navigation keys
//!
//! A navigation key is an immutable value describing *what* to show. Keys
//! compare structurally; two pushes of equal keys still produce two distinct
//! backstack entries.

use std::fmt::Debug;

use crate::node::NavigationNode;
use crate::types::KeyType;

/// Identity of a destination
///
/// Applications usually implement this on a single enum of all their
/// destinations and report one [`KeyType`] per presentation they declare.
///
/// Persisting a navigator additionally requires `Serialize + DeserializeOwned`.
///
/// ```rust
/// use zos_navigation::{KeyType, NavigationKey};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Route {
///     Inbox,
///     Message { id: u64 },
/// }
///
/// impl NavigationKey for Route {
///     fn key_type(&self) -> KeyType {
///         match self {
///             Route::Inbox => KeyType::new("Inbox"),
///             Route::Message { .. } => KeyType::new("Message"),
///         }
///     }
/// }
///
/// assert_eq!(Route::Message { id: 7 }.key_type().as_str(), "Message");
/// ```
pub trait NavigationKey: Clone + PartialEq + Debug + 'static {
    /// The type name used for presentation and transition lookup
    fn key_type(&self) -> KeyType;

    /// A node this key describes itself, bypassing the presentation table
    fn navigation_node(&self) -> Option<NavigationNode> {
        None
    }
}
