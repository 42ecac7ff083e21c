use crate::traits::MainThreadExecutor;
use std::sync::{Arc, Condvar, Mutex};

/// One-shot single-producer/single-consumer result cell.
///
/// Used to block a worker thread on a value computed on the host's
/// main thread. Completing the cell twice is an invariant violation in
/// the handoff logic and panics rather than being silently ignored.
pub struct CompletionCell<T> {
    inner: Mutex<CellInner<T>>,
    ready: Condvar,
}

struct CellInner<T> {
    value: Option<T>,
    completed: bool,
}

impl<T> CompletionCell<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CellInner {
                value: None,
                completed: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// # Panics
    ///
    /// Panics if the cell was already completed.
    pub fn complete(&self, value: T) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.completed {
            panic!("completion cell set twice");
        }
        inner.value = Some(value);
        inner.completed = true;
        self.ready.notify_all();
    }

    pub fn is_completed(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .completed
    }

    /// Blocks until the producer completes the cell, then takes the
    /// value. Single consumer; a second call would block forever.
    pub fn wait(&self) -> T {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(value) = inner.value.take() {
                return value;
            }
            inner = self.ready.wait(inner).unwrap_or_else(|e| e.into_inner());
        }
    }
}

impl<T> Default for CompletionCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `f` on the host's main thread and returns its result.
///
/// Accessibility queries return unreliable results off the main thread,
/// so callers that may run on a worker thread route reads through here.
/// Runs inline when already on the main thread.
pub fn run_on_main<T, F>(executor: &dyn MainThreadExecutor, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    if executor.is_main_thread() {
        return f();
    }
    let cell = Arc::new(CompletionCell::new());
    let producer = Arc::clone(&cell);
    executor.call_on_main(Box::new(move || producer.complete(f())));
    cell.wait()
}
