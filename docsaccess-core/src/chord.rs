use crate::keys::{KeyEvent, VirtualKey, us_layout_vk};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Modifier set for most Google Docs navigation accelerators.
pub const CONTROL_ALT: &[VirtualKey] = &[VirtualKey::LCONTROL, VirtualKey::LMENU];

/// Modifier set for the few accelerators that add shift (e.g. tables).
pub const CONTROL_ALT_SHIFT: &[VirtualKey] = &[
    VirtualKey::LCONTROL,
    VirtualKey::LMENU,
    VirtualKey::LSHIFT,
];

#[derive(Debug, Error)]
pub enum ChordError {
    #[error("character {0:?} has no US-layout virtual key")]
    UnmappedCharacter(char),
}

/// Symbolic description of one native Google Docs accelerator.
///
/// `modifiers` are held for the whole chord; each character of `keys`
/// is tapped (press+release) while they are held. `release_shift`
/// forces any physically held shift key up first, which matters for the
/// `shift+<key>` quick-nav gestures: the user's shift must not leak
/// into the synthesized chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCommand {
    pub modifiers: Vec<VirtualKey>,
    pub keys: String,
    pub release_shift: bool,
}

impl NativeCommand {
    pub fn new(modifiers: &[VirtualKey], keys: impl Into<String>) -> Self {
        Self {
            modifiers: modifiers.to_vec(),
            keys: keys.into(),
            release_shift: false,
        }
    }

    pub fn with_shift_released(modifiers: &[VirtualKey], keys: impl Into<String>) -> Self {
        Self {
            modifiers: modifiers.to_vec(),
            keys: keys.into(),
            release_shift: true,
        }
    }

    /// Expands the descriptor into the exact event sequence to inject.
    pub fn events(&self) -> Result<Vec<KeyEvent>, ChordError> {
        let taps = self
            .keys
            .chars()
            .map(|c| us_layout_vk(c).ok_or(ChordError::UnmappedCharacter(c)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(chord_events(&self.modifiers, &taps, self.release_shift))
    }
}

/// Builds a chord the way a human would press it: modifiers go down in
/// listed order, each tap key is pressed and released in order, then
/// the modifiers come back up in reverse order. The receiving
/// application cannot tell this apart from hardware input.
pub fn chord_events(held: &[VirtualKey], taps: &[VirtualKey], release_shift: bool) -> Vec<KeyEvent> {
    let mut events = Vec::with_capacity(held.len() * 2 + taps.len() * 2 + 2);
    if release_shift {
        events.push(KeyEvent::release(VirtualKey::LSHIFT));
        events.push(KeyEvent::release(VirtualKey::RSHIFT));
    }
    for &vk in held {
        events.push(KeyEvent::press(vk));
    }
    for &vk in taps {
        events.push(KeyEvent::press(vk));
        events.push(KeyEvent::release(vk));
    }
    for &vk in held.iter().rev() {
        events.push(KeyEvent::release(vk));
    }
    events
}
