//! Per-kind presentation options

use std::fmt;
use std::rc::Rc;

/// Whether a dialog window should be marked secure (excluded from screenshots)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SecureFlagPolicy {
    /// Follow the parent window's flag
    #[default]
    Inherit,
    /// Always mark secure
    SecureOn,
    /// Never mark secure
    SecureOff,
}

/// Options for dialog destinations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogOptions {
    /// Dismiss when the user clicks outside the dialog
    pub dismiss_on_click_outside: bool,
    /// Dismiss on back press
    pub dismiss_on_back_press: bool,
    /// Secure flag handling
    pub secure_policy: SecureFlagPolicy,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            dismiss_on_click_outside: true,
            dismiss_on_back_press: true,
            secure_policy: SecureFlagPolicy::Inherit,
        }
    }
}

/// Resting positions of a bottom sheet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SheetValue {
    /// Off screen
    #[default]
    Hidden,
    /// Partially visible
    HalfExpanded,
    /// Fully visible
    Expanded,
}

/// Predicate consulted before a sheet moves to a new resting position
pub type ConfirmStateChange = Rc<dyn Fn(SheetValue) -> bool>;

/// Callback invoked when the scrim outside a sheet is clicked
pub type OutsideClick = Rc<dyn Fn()>;

/// Options for bottom-sheet destinations
#[derive(Clone)]
pub struct BottomSheetOptions {
    /// Scrim color override as `0xAARRGGBB`
    pub scrim_color: Option<u32>,
    /// Veto for sheet state changes; `None` accepts every change
    pub confirm_state_change: Option<ConfirmStateChange>,
    /// Dismiss when the scrim is clicked
    pub dismiss_on_click_outside: bool,
    /// Extra callback fired on scrim clicks
    pub on_outside_click: Option<OutsideClick>,
}

impl Default for BottomSheetOptions {
    fn default() -> Self {
        Self {
            scrim_color: None,
            confirm_state_change: None,
            dismiss_on_click_outside: true,
            on_outside_click: None,
        }
    }
}

impl BottomSheetOptions {
    /// Ask the confirm predicate whether `target` is acceptable
    pub fn confirms(&self, target: SheetValue) -> bool {
        self.confirm_state_change
            .as_ref()
            .map_or(true, |confirm| confirm(target))
    }
}

impl fmt::Debug for BottomSheetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BottomSheetOptions")
            .field("scrim_color", &self.scrim_color)
            .field("confirm_state_change", &self.confirm_state_change.is_some())
            .field("dismiss_on_click_outside", &self.dismiss_on_click_outside)
            .field("on_outside_click", &self.on_outside_click.is_some())
            .finish()
    }
}
