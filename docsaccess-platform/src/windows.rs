// Windows key injection.
//
// Chords are submitted as raw virtual-key transitions so the receiving
// application sees the same stream a hardware keyboard would produce.

#![cfg(windows)]

use docsaccess_core::keys::{KeyDirection, KeyEvent};
use docsaccess_engine::traits::InputInjector;
use enigo::Keyboard;
use std::sync::Mutex;

pub struct WindowsInjector {
    // enigo is not Sync; injection is serialized anyway since all
    // gestures arrive on the host's event thread.
    enigo: Mutex<enigo::Enigo>,
}

impl WindowsInjector {
    pub fn new() -> anyhow::Result<Self> {
        let enigo = enigo::Enigo::new(&enigo::Settings::default())
            .map_err(|e| anyhow::anyhow!("failed to init enigo: {e}"))?;
        Ok(Self {
            enigo: Mutex::new(enigo),
        })
    }
}

impl InputInjector for WindowsInjector {
    fn inject(&self, events: &[KeyEvent]) -> anyhow::Result<()> {
        let mut enigo = self.enigo.lock().unwrap_or_else(|e| e.into_inner());
        for event in events {
            let direction = match event.direction {
                KeyDirection::Press => enigo::Direction::Press,
                KeyDirection::Release => enigo::Direction::Release,
            };
            // Key::Other takes the VK code directly, which sidesteps
            // layout translation entirely.
            enigo
                .key(enigo::Key::Other(event.vk.code() as u32), direction)
                .map_err(|e| {
                    anyhow::anyhow!("failed to inject vk {:#04x}: {e}", event.vk.code())
                })?;
        }
        Ok(())
    }
}
