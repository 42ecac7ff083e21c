//! In-memory collaborator doubles for tests and headless runs.

use docsaccess_core::keys::KeyEvent;
use docsaccess_core::types::{FocusSnapshot, TextUnit};
use docsaccess_engine::traits::{
    FocusNotifier, FocusProvider, HostApiError, InjectionSuppressor, InputInjector,
    MainThreadExecutor, Scheduler, SpeechOutput, Subscription, UrlSource,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct MemoryInjector {
    pub injected: Mutex<Vec<KeyEvent>>,
}

impl InputInjector for MemoryInjector {
    fn inject(&self, events: &[KeyEvent]) -> anyhow::Result<()> {
        self.injected.lock().unwrap().extend_from_slice(events);
        Ok(())
    }
}

#[derive(Default)]
pub struct NoopSuppressor;

impl InjectionSuppressor for NoopSuppressor {
    fn begin(&self) {}

    fn end(&self) {}
}

#[derive(Default)]
pub struct MemorySpeech {
    pub spoken: Mutex<Vec<String>>,
    pub cancelled: Mutex<usize>,
}

impl SpeechOutput for MemorySpeech {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }

    fn cancel(&self) {
        *self.cancelled.lock().unwrap() += 1;
    }
}

/// URL source with a settable current value.
#[derive(Default)]
pub struct StaticUrlSource {
    url: Mutex<Option<String>>,
}

impl StaticUrlSource {
    pub fn with_url(url: &str) -> Self {
        Self {
            url: Mutex::new(Some(url.to_string())),
        }
    }

    pub fn set(&self, url: Option<&str>) {
        *self.url.lock().unwrap() = url.map(str::to_string);
    }
}

impl UrlSource for StaticUrlSource {
    fn current_url(&self) -> Option<String> {
        self.url.lock().unwrap().clone()
    }
}

/// Focus provider backed by a fixed snapshot and caret text.
pub struct SnapshotFocus {
    pub snapshot: Mutex<Option<FocusSnapshot>>,
    pub caret_text: Mutex<String>,
}

impl SnapshotFocus {
    pub fn new(snapshot: FocusSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            caret_text: Mutex::new(String::new()),
        }
    }
}

impl FocusProvider for SnapshotFocus {
    fn focused_snapshot(&self) -> anyhow::Result<FocusSnapshot> {
        self.snapshot
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("focus object unavailable"))
    }

    fn unit_text_at_caret(&self, _unit: TextUnit) -> anyhow::Result<String> {
        Ok(self.caret_text.lock().unwrap().clone())
    }
}

type Callback = Box<dyn FnOnce() + Send>;

/// One-shot timer double; queued callbacks run only when the test pumps
/// them, which keeps deferred work fully deterministic.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<VecDeque<(Duration, Callback)>>,
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    pub fn run_next(&self) -> bool {
        let next = self.queue.lock().unwrap().pop_front();
        match next {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn run_until_idle(&self) {
        let mut budget = 1_000;
        while self.run_next() {
            budget -= 1;
            assert!(budget > 0, "scheduler never went idle");
        }
    }
}

impl Scheduler for ManualScheduler {
    fn call_later(&self, delay: Duration, callback: Callback) {
        self.queue.lock().unwrap().push_back((delay, callback));
    }
}

/// Executor double that treats the current thread as the main thread.
#[derive(Default)]
pub struct InlineMainThread;

impl MainThreadExecutor for InlineMainThread {
    fn is_main_thread(&self) -> bool {
        true
    }

    fn call_on_main(&self, callback: Callback) {
        callback();
    }
}

type NotifierCallback = Box<dyn Fn() + Send + Sync>;

/// Notifier double; `fire` simulates a focus-or-URL-changed event.
#[derive(Default)]
pub struct ManualNotifier {
    callbacks: Arc<Mutex<Vec<NotifierCallback>>>,
    pub refuse: bool,
}

impl ManualNotifier {
    pub fn unsupported() -> Self {
        Self {
            callbacks: Arc::default(),
            refuse: true,
        }
    }

    pub fn fire(&self) {
        for callback in self.callbacks.lock().unwrap().iter() {
            callback();
        }
    }
}

impl FocusNotifier for ManualNotifier {
    fn subscribe(&self, callback: NotifierCallback) -> Result<Subscription, HostApiError> {
        if self.refuse {
            return Err(HostApiError::Unsupported);
        }
        let callbacks = Arc::clone(&self.callbacks);
        callbacks.lock().unwrap().push(callback);
        let on_drop = Arc::clone(&self.callbacks);
        Ok(Subscription::new(move || {
            on_drop.lock().unwrap().clear();
        }))
    }
}
