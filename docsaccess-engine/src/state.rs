use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Session-wide mutable state, created at plugin activation and shared
/// by `Arc` with the interceptor, tracker and deferred-speech tasks.
///
/// All fields are mutated from the host's single logical event thread;
/// the atomics exist so the state can cross the main-thread handoff
/// boundary, not for contention.
#[derive(Debug)]
pub struct AddonState {
    enabled: AtomicBool,
    generation: AtomicU64,
    in_main_editor: AtomicBool,
}

impl AddonState {
    pub fn new(start_enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(start_enabled),
            generation: AtomicU64::new(0),
            in_main_editor: AtomicBool::new(false),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, value: bool) {
        self.enabled.store(value, Ordering::Relaxed);
    }

    /// Flips the enabled flag and returns the new value.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::Relaxed)
    }

    /// Current keystroke generation. Deferred tasks compare against the
    /// value they captured at spawn time to detect supersession.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Incremented exactly once per dispatched gesture; total-orders
    /// dispatches and silently cancels all older deferred work.
    pub fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn in_main_editor(&self) -> bool {
        self.in_main_editor.load(Ordering::Relaxed)
    }

    pub fn set_in_main_editor(&self, value: bool) {
        self.in_main_editor.store(value, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_idempotent_pair() {
        let state = AddonState::new(true);
        assert!(!state.toggle());
        assert!(state.toggle());
        assert!(state.enabled());
    }

    #[test]
    fn generation_is_monotonic() {
        let state = AddonState::new(true);
        assert_eq!(state.generation(), 0);
        assert_eq!(state.bump_generation(), 1);
        assert_eq!(state.bump_generation(), 2);
        assert_eq!(state.generation(), 2);
    }
}
