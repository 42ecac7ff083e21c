use crate::dispatch::{DispatchTable, OverrideAction};
use crate::state::AddonState;
use crate::traits::{Gesture, HostDispatch, HostScript};
use docsaccess_core::gesture::normalize_identifier;
use std::sync::Arc;

/// Answer for one gesture resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The host's own answer, returned unchanged (possibly "no script").
    Host(Option<HostScript>),
    /// One of our dispatch-table actions takes over.
    Override(OverrideAction),
}

/// Where a table-navigation request originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableNavSource {
    BrowseModeDocument,
    Other,
}

/// What a table-navigation request should execute against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableNavTarget {
    BrowseMode,
    FocusedObject,
}

/// Wrapping layer around the host's gesture resolution.
///
/// The host calls through here instead of its own resolver; anything
/// this layer does not claim falls through to the host's answer
/// untouched, so unknown gestures behave exactly as without the add-on.
pub struct GestureInterceptor {
    host: Arc<dyn HostDispatch>,
    table: DispatchTable,
    state: Arc<AddonState>,
}

impl GestureInterceptor {
    pub fn new(host: Arc<dyn HostDispatch>, table: DispatchTable, state: Arc<AddonState>) -> Self {
        Self { host, table, state }
    }

    /// Called for every gesture the host dispatches. Bumps the
    /// generation counter first so any pending deferred speech observes
    /// supersession even when this gesture is not overridden.
    pub fn resolve_script(&self, gesture: &dyn Gesture) -> Resolution {
        self.state.bump_generation();
        let default = self.host.resolve_default(gesture);
        if !self.host.in_pass_through() && self.state.enabled() && self.state.in_main_editor() {
            let keystroke = normalize_identifier(gesture.identifier());
            if let Some(action) = self.table.resolve(keystroke) {
                log::debug!("overriding {keystroke} with {action:?}");
                return Resolution::Override(action.clone());
            }
        }
        Resolution::Host(default)
    }

    /// Table semantics belong to the Docs editing surface while it is
    /// the active main editor, so requests from the browse-mode layer
    /// are redirected to the focused object.
    pub fn table_navigation_target(&self, source: TableNavSource) -> TableNavTarget {
        if source == TableNavSource::BrowseModeDocument
            && self.state.enabled()
            && self.state.in_main_editor()
        {
            TableNavTarget::FocusedObject
        } else {
            TableNavTarget::BrowseMode
        }
    }
}
