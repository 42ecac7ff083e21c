use docsaccess_core::chord::{CONTROL_ALT, CONTROL_ALT_SHIFT, NativeCommand};
use docsaccess_core::keys::VirtualKey;
use docsaccess_core::types::TextUnit;
use std::collections::HashMap;

/// What to do instead of the host's default script for one gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideAction {
    /// Replace the gesture with a native Docs accelerator chord.
    NativeCommand(NativeCommand),

    /// Let the keystroke reach the editor unmodified, then speak the
    /// settled text unit at the caret (if one is given).
    PassThrough { unit: Option<TextUnit> },
}

/// Static gesture-to-action map, built once at load time.
#[derive(Debug, Default)]
pub struct DispatchTable {
    entries: HashMap<String, OverrideAction>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the pair of entries for one quick-nav category:
    /// `key` sends the native "next" command (`n` prefix) and
    /// `shift+key` sends "previous" (`p` prefix) with the user's held
    /// shift forced up first.
    pub fn quick_nav(&mut self, key: &str, modifiers: &[VirtualKey], letter: char) {
        self.entries.insert(
            key.to_string(),
            OverrideAction::NativeCommand(NativeCommand::new(modifiers, format!("n{letter}"))),
        );
        self.entries.insert(
            format!("shift+{key}"),
            OverrideAction::NativeCommand(NativeCommand::with_shift_released(
                modifiers,
                format!("p{letter}"),
            )),
        );
    }

    /// Installs a pass-through entry; the gesture reaches the editor
    /// and, if `unit` is given, the settled unit text is spoken.
    pub fn pass_through(&mut self, key: &str, unit: Option<TextUnit>) {
        self.entries
            .insert(key.to_string(), OverrideAction::PassThrough { unit });
    }

    /// Not-found means "let the host handle this normally".
    pub fn resolve(&self, keystroke: &str) -> Option<&OverrideAction> {
        self.entries.get(keystroke)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The full Google Docs table: quick-nav categories on the left,
    /// caret-navigation pass-throughs on the right of the map.
    pub fn docs_defaults() -> Self {
        let mut table = Self::new();

        table.quick_nav("h", CONTROL_ALT, 'h');
        for digit in '1'..='6' {
            table.quick_nav(&digit.to_string(), CONTROL_ALT, digit);
        }
        table.quick_nav("k", CONTROL_ALT, 'l');
        table.quick_nav("l", CONTROL_ALT, 'l');
        table.quick_nav("i", CONTROL_ALT, 'i');
        table.quick_nav("g", CONTROL_ALT, 'g');
        table.quick_nav("t", CONTROL_ALT_SHIFT, 't');

        table.pass_through("upArrow", Some(TextUnit::Line));
        table.pass_through("downArrow", Some(TextUnit::Line));
        table.pass_through("control+home", Some(TextUnit::Line));
        table.pass_through("control+end", Some(TextUnit::Line));
        table.pass_through("pageUp", Some(TextUnit::Line));
        table.pass_through("pageDown", Some(TextUnit::Line));
        table.pass_through("leftArrow", Some(TextUnit::Character));
        table.pass_through("rightArrow", Some(TextUnit::Character));
        table.pass_through("home", Some(TextUnit::Character));
        table.pass_through("end", Some(TextUnit::Character));
        table.pass_through("control+upArrow", Some(TextUnit::Paragraph));
        table.pass_through("control+downArrow", Some(TextUnit::Paragraph));
        table.pass_through("control+leftArrow", Some(TextUnit::Word));
        table.pass_through("control+rightArrow", Some(TextUnit::Word));

        table
    }
}
