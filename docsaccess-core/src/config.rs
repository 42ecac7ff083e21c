use serde::{Deserialize, Serialize};

/// Timings for the settle-and-speak poll loop after a pass-through
/// navigation keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredSpeechTimings {
    /// Delay before the first sample; Docs repaints fast but not
    /// synchronously with the keystroke.
    pub settle_delay_ms: u64,
    pub poll_interval_ms: u64,
    pub speak_timeout_ms: u64,
}

impl Default for DeferredSpeechTimings {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1,
            poll_interval_ms: 50,
            speak_timeout_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonConfig {
    pub start_enabled: bool,

    #[serde(default)]
    pub deferred_speech: DeferredSpeechTimings,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            start_enabled: true,
            deferred_speech: DeferredSpeechTimings::default(),
        }
    }
}
