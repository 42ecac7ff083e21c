use serde::{Deserialize, Serialize};

/// Accessible-tree role, reduced to what the editor fingerprint needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    EditableText,
    Document,
    Unknown,
}

/// Structural facts about the focused accessible object, captured in
/// one shot on the host's main thread. Accessibility queries off the
/// main thread return unreliable results, so callers snapshot instead
/// of holding a live object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSnapshot {
    pub role: Role,
    pub parent_role: Option<Role>,
    pub has_previous_sibling: bool,
    pub has_next_sibling: bool,
}

/// Text unit spoken after a pass-through navigation keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextUnit {
    Character,
    Word,
    Line,
    Paragraph,
}
