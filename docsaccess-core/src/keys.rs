use serde::{Deserialize, Serialize};

/// Windows virtual-key code.
///
/// Injection targets the Win32 input queue, so these are the `VK_*`
/// values, not scan codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualKey(pub u16);

impl VirtualKey {
    pub const LSHIFT: VirtualKey = VirtualKey(0xA0);
    pub const RSHIFT: VirtualKey = VirtualKey(0xA1);
    pub const LCONTROL: VirtualKey = VirtualKey(0xA2);
    pub const RCONTROL: VirtualKey = VirtualKey(0xA3);
    pub const LMENU: VirtualKey = VirtualKey(0xA4);
    pub const RMENU: VirtualKey = VirtualKey(0xA5);

    pub fn code(self) -> u16 {
        self.0
    }
}

/// Resolves a character to the virtual key that produces it on the US
/// English layout.
///
/// Google Docs accelerators are defined against the US layout, so this
/// must never consult the machine's active layout; doing so would
/// silently break the chords on non-US systems.
pub fn us_layout_vk(c: char) -> Option<VirtualKey> {
    let code = match c {
        'a'..='z' => c as u16 - 'a' as u16 + 0x41,
        'A'..='Z' => c as u16 - 'A' as u16 + 0x41,
        '0'..='9' => c as u16 - '0' as u16 + 0x30,
        ' ' => 0x20,
        ';' => 0xBA,
        '=' => 0xBB,
        ',' => 0xBC,
        '-' => 0xBD,
        '.' => 0xBE,
        '/' => 0xBF,
        '`' => 0xC0,
        '[' => 0xDB,
        '\\' => 0xDC,
        ']' => 0xDD,
        '\'' => 0xDE,
        _ => return None,
    };
    Some(VirtualKey(code))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyDirection {
    Press,
    Release,
}

/// One synthetic key transition, as handed to the injector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub vk: VirtualKey,
    pub direction: KeyDirection,
}

impl KeyEvent {
    pub fn press(vk: VirtualKey) -> Self {
        Self {
            vk,
            direction: KeyDirection::Press,
        }
    }

    pub fn release(vk: VirtualKey) -> Self {
        Self {
            vk,
            direction: KeyDirection::Release,
        }
    }
}
