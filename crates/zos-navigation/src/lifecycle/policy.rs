//! Render groups and the policies that compute them
//!
//! A render policy decides which backstack entries are drawn and what
//! lifecycle ceiling each tracked entry gets. The default policy knows the
//! three built-in presentations:
//!
//! - **Screen slot**: the last screen in the backstack
//! - **Dialog slot**: the top entry when it is a dialog
//! - **Bottom-sheet slot**: the last sheet, while only dialogs sit above it
//!
//! At most one entry is ever [`LifecycleState::Resumed`]: the top of the
//! backstack. Obscured but drawn entries stay started; everything not drawn
//! falls to created.

use serde::{Deserialize, Serialize};

use crate::backstack::{Backstack, BackstackEntry};
use crate::key::NavigationKey;
use crate::navigator::Navigator;
use crate::node::NodeKind;
use crate::types::EntryId;

use super::entries::LifecycleEntries;
use super::state::LifecycleState;

/// Entries currently drawn
pub trait RenderGroup {
    /// Ids of every drawn entry
    fn entry_ids(&self) -> Vec<&EntryId>;

    /// Whether `id` is drawn
    fn contains(&self, id: &EntryId) -> bool {
        self.entry_ids().contains(&id)
    }
}

/// Strategy for render groups and lifecycle ceilings
pub trait RenderPolicy<K: NavigationKey> {
    /// The render group this policy produces
    type Group: RenderGroup;

    /// Compute the render group for the navigator's backstack, creating the
    /// lifecycle entries it needs
    fn render_group(&self, navigator: &Navigator<K>, entries: &mut LifecycleEntries)
        -> Self::Group;

    /// Assign ceilings to every tracked entry
    fn update_lifecycles(
        &self,
        group: &Self::Group,
        backstack: &Backstack<K>,
        entries: &mut LifecycleEntries,
    );
}

/// Screen, dialog and bottom-sheet slots
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRenderGroup {
    pub screen: Option<EntryId>,
    pub dialog: Option<EntryId>,
    pub bottom_sheet: Option<EntryId>,
}

impl DefaultRenderGroup {
    /// Whether nothing is drawn
    pub fn is_empty(&self) -> bool {
        self.screen.is_none() && self.dialog.is_none() && self.bottom_sheet.is_none()
    }
}

impl RenderGroup for DefaultRenderGroup {
    fn entry_ids(&self) -> Vec<&EntryId> {
        [&self.screen, &self.bottom_sheet, &self.dialog]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// The built-in screen/dialog/bottom-sheet policy
///
/// Custom node kinds never occupy a slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRenderPolicy;

impl<K: NavigationKey> RenderPolicy<K> for DefaultRenderPolicy {
    type Group = DefaultRenderGroup;

    fn render_group(
        &self,
        navigator: &Navigator<K>,
        entries: &mut LifecycleEntries,
    ) -> DefaultRenderGroup {
        let backstack = navigator.backstack();
        let Some(current) = backstack.current() else {
            return DefaultRenderGroup::default();
        };
        let kind_of = |entry: &BackstackEntry<K>| navigator.navigation_node(entry).kind();

        let screen = navigator.last_of_kind(backstack, &NodeKind::Screen);
        let current_kind = kind_of(current);
        let dialog = (current_kind == NodeKind::Dialog).then_some(current);
        let bottom_sheet = backstack
            .iter()
            .rposition(|entry| kind_of(entry) == NodeKind::BottomSheet)
            .filter(|&index| {
                backstack[index + 1..]
                    .iter()
                    .all(|entry| kind_of(entry) == NodeKind::Dialog)
            })
            .map(|index| &backstack[index]);

        let group = DefaultRenderGroup {
            screen: screen.map(|entry| entry.id.clone()),
            dialog: dialog.map(|entry| entry.id.clone()),
            bottom_sheet: bottom_sheet.map(|entry| entry.id.clone()),
        };

        // A dialog or sheet that just covered a different presentation takes
        // over immediately
        let below_kind = backstack
            .len()
            .checked_sub(2)
            .map(|index| kind_of(&backstack[index]));
        let freshly_entered = matches!(current_kind, NodeKind::Dialog | NodeKind::BottomSheet)
            && below_kind.as_ref() != Some(&current_kind);

        for id in group.entry_ids() {
            let ceiling = if freshly_entered && *id == current.id {
                LifecycleState::Resumed
            } else {
                LifecycleState::Started
            };
            entries.get_or_create(id).set_max_state(ceiling);
        }
        group
    }

    fn update_lifecycles(
        &self,
        group: &DefaultRenderGroup,
        backstack: &Backstack<K>,
        entries: &mut LifecycleEntries,
    ) {
        let top = backstack.current().map(|entry| &entry.id);
        for entry in entries.iter_mut() {
            let ceiling = if !group.contains(entry.id()) {
                LifecycleState::Created
            } else if Some(entry.id()) == top {
                LifecycleState::Resumed
            } else {
                LifecycleState::Started
            };
            entry.set_max_state(ceiling);
        }
    }
}
