//! Runtime presentation objects

use std::borrow::Cow;
use std::cell::Cell;

use super::kind::NodeKind;
use super::options::{BottomSheetOptions, DialogOptions, SheetValue};

/// How a destination is presented
///
/// Nodes are memoized per backstack entry id by the navigator, so any state a
/// node carries (such as a bottom sheet's resting position) lives exactly as
/// long as the entry does.
#[derive(Clone, Debug)]
pub enum NavigationNode {
    /// Full-screen destination
    Screen,
    /// Dialog above the current screen
    Dialog(DialogOptions),
    /// Bottom sheet above the current screen
    BottomSheet(BottomSheetNode),
    /// Application-defined presentation
    Custom(CustomNode),
}

impl NavigationNode {
    /// A dialog node with the given options
    pub fn dialog(options: DialogOptions) -> Self {
        Self::Dialog(options)
    }

    /// A bottom-sheet node with the given options
    pub fn bottom_sheet(options: BottomSheetOptions) -> Self {
        Self::BottomSheet(BottomSheetNode::new(options))
    }

    /// The node's presentation kind
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Screen => NodeKind::Screen,
            Self::Dialog(_) => NodeKind::Dialog,
            Self::BottomSheet(_) => NodeKind::BottomSheet,
            Self::Custom(node) => NodeKind::Custom(node.name.clone()),
        }
    }

    /// Whether this node is of the given kind
    pub fn is_kind(&self, kind: &NodeKind) -> bool {
        match (self, kind) {
            (Self::Screen, NodeKind::Screen)
            | (Self::Dialog(_), NodeKind::Dialog)
            | (Self::BottomSheet(_), NodeKind::BottomSheet) => true,
            (Self::Custom(node), NodeKind::Custom(name)) => node.name == *name,
            _ => false,
        }
    }

    /// Dialog options, if this is a dialog
    pub fn as_dialog(&self) -> Option<&DialogOptions> {
        match self {
            Self::Dialog(options) => Some(options),
            _ => None,
        }
    }

    /// Bottom-sheet node, if this is a bottom sheet
    pub fn as_bottom_sheet(&self) -> Option<&BottomSheetNode> {
        match self {
            Self::BottomSheet(node) => Some(node),
            _ => None,
        }
    }
}

/// A bottom sheet and its current resting position
#[derive(Clone, Debug)]
pub struct BottomSheetNode {
    options: BottomSheetOptions,
    value: Cell<SheetValue>,
}

impl BottomSheetNode {
    /// Create a hidden sheet
    pub fn new(options: BottomSheetOptions) -> Self {
        Self {
            options,
            value: Cell::new(SheetValue::Hidden),
        }
    }

    /// The sheet's options
    pub fn options(&self) -> &BottomSheetOptions {
        &self.options
    }

    /// Current resting position
    pub fn value(&self) -> SheetValue {
        self.value.get()
    }

    /// Move to `target` if the confirm predicate allows it
    ///
    /// Returns true if the value changed.
    pub fn request_value(&self, target: SheetValue) -> bool {
        if self.value.get() == target || !self.options.confirms(target) {
            return false;
        }
        self.value.set(target);
        true
    }
}

/// Presentation of an application-defined kind
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomNode {
    name: Cow<'static, str>,
}

impl CustomNode {
    /// Create a custom node of the named kind
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// The node's kind
    pub fn kind(&self) -> NodeKind {
        NodeKind::Custom(self.name.clone())
    }
}
