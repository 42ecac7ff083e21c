use crate::handoff::run_on_main;
use crate::state::AddonState;
use crate::traits::{FocusProvider, MainThreadExecutor, UrlSource};
use docsaccess_core::types::{FocusSnapshot, Role};
use std::sync::Arc;

pub const DOCS_DOCUMENT_URL_PREFIX: &str = "https://docs.google.com/document/";

/// Decides whether the focused object is the main Docs editing surface.
///
/// The structural fingerprint (an editable-text leaf with no siblings
/// directly under a document-role parent) distinguishes the body editor
/// from comment boxes and the title field, which sit among siblings.
/// Getting this wrong misroutes user keystrokes, so the fingerprint is
/// checked in full every time.
pub fn is_main_editor(url: Option<&str>, snapshot: Option<&FocusSnapshot>) -> bool {
    let Some(url) = url else {
        return false;
    };
    if !url.starts_with(DOCS_DOCUMENT_URL_PREFIX) {
        return false;
    }
    let Some(snapshot) = snapshot else {
        return false;
    };
    snapshot.role == Role::EditableText
        && !snapshot.has_previous_sibling
        && !snapshot.has_next_sibling
        && snapshot.parent_role == Some(Role::Document)
}

/// Keeps the session-state context flag current.
///
/// `refresh` is wired to the host's focus-or-URL-changed notification
/// and recomputes the flag synchronously on each firing.
pub struct EditorTracker {
    state: Arc<AddonState>,
    url: Arc<dyn UrlSource>,
    focus: Arc<dyn FocusProvider>,
    main_thread: Arc<dyn MainThreadExecutor>,
}

impl EditorTracker {
    pub fn new(
        state: Arc<AddonState>,
        url: Arc<dyn UrlSource>,
        focus: Arc<dyn FocusProvider>,
        main_thread: Arc<dyn MainThreadExecutor>,
    ) -> Self {
        Self {
            state,
            url,
            focus,
            main_thread,
        }
    }

    pub fn refresh(&self) {
        let url = self.url.current_url();
        let in_editor = match url.as_deref() {
            Some(url) if url.starts_with(DOCS_DOCUMENT_URL_PREFIX) => {
                let focus = Arc::clone(&self.focus);
                // A briefly invalid focus object mid-navigation reads as
                // "not in editor" for this cycle.
                let snapshot =
                    run_on_main(self.main_thread.as_ref(), move || {
                        focus.focused_snapshot().ok()
                    });
                is_main_editor(Some(url), snapshot.as_ref())
            }
            _ => false,
        };
        self.state.set_in_main_editor(in_editor);
    }
}
