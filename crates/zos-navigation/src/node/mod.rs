//! Navigation nodes
//!
//! A node is the runtime presentation a key resolves to: a full screen, a
//! dialog, a bottom sheet, or an application-defined kind.

mod kind;
#[allow(clippy::module_inception)]
mod node;
mod options;

pub use kind::NodeKind;
pub use node::{BottomSheetNode, CustomNode, NavigationNode};
pub use options::{BottomSheetOptions, DialogOptions, SecureFlagPolicy, SheetValue};
