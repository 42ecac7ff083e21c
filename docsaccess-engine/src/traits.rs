use docsaccess_core::keys::KeyEvent;
use docsaccess_core::types::{FocusSnapshot, TextUnit};
use std::time::Duration;
use thiserror::Error;

/// A normalized input event the host resolves to a script.
///
/// The host owns the concrete gesture object; this layer only needs its
/// identifier and the ability to forward it unmodified.
pub trait Gesture {
    fn identifier(&self) -> &str;

    /// Performs the gesture's default action against the focused
    /// control, bypassing any further resolution.
    fn send(&self);
}

/// Opaque handle to a script the host resolved on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostScript(pub String);

#[derive(Debug, Error)]
pub enum HostApiError {
    #[error("required host notification API is unavailable")]
    Unsupported,
    #[error("host call failed: {0}")]
    Other(String),
}

/// The host's own gesture resolution, which the interceptor wraps.
pub trait HostDispatch: Send + Sync {
    fn resolve_default(&self, gesture: &dyn Gesture) -> Option<HostScript>;

    /// True while the host routes every key to the control directly
    /// (focus/pass-through mode); nothing is overridden then.
    fn in_pass_through(&self) -> bool;
}

/// Accessibility queries against the focused object.
pub trait FocusProvider: Send + Sync {
    /// Structural facts about the focused object. Only reliable on the
    /// host's main thread; marshal via [`crate::handoff::run_on_main`]
    /// from anywhere else.
    fn focused_snapshot(&self) -> anyhow::Result<FocusSnapshot>;

    /// Text of `unit` at the current caret position.
    fn unit_text_at_caret(&self, unit: TextUnit) -> anyhow::Result<String>;
}

/// Current document URL, maintained by the host's URL tracker.
pub trait UrlSource: Send + Sync {
    fn current_url(&self) -> Option<String>;
}

pub trait SpeechOutput: Send + Sync {
    fn speak(&self, text: &str);
    fn cancel(&self);
}

/// The host's cooperative one-shot timer.
pub trait Scheduler: Send + Sync {
    fn call_later(&self, delay: Duration, callback: Box<dyn FnOnce() + Send>);
}

/// Submits synthetic key transitions to the OS input queue.
pub trait InputInjector: Send + Sync {
    fn inject(&self, events: &[KeyEvent]) -> anyhow::Result<()>;
}

/// Host hook that marks subsequently injected input as synthetic.
///
/// Injection must happen between `begin` and `end`, otherwise the
/// interceptor would re-intercept its own chords.
pub trait InjectionSuppressor: Send + Sync {
    fn begin(&self);
    fn end(&self);
}

pub trait MainThreadExecutor: Send + Sync {
    fn is_main_thread(&self) -> bool;
    fn call_on_main(&self, callback: Box<dyn FnOnce() + Send>);
}

/// Subscription to the host's "focus or URL changed" notification,
/// fired after navigation settles.
pub trait FocusNotifier: Send + Sync {
    fn subscribe(
        &self,
        callback: Box<dyn Fn() + Send + Sync>,
    ) -> Result<Subscription, HostApiError>;
}

/// RAII handle for a notifier registration; dropping it unsubscribes.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
