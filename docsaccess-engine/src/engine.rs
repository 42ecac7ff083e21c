use crate::deferred::{DeferredSpeech, StepOutcome};
use crate::dispatch::OverrideAction;
use crate::state::AddonState;
use crate::traits::{
    FocusProvider, Gesture, InjectionSuppressor, InputInjector, Scheduler, SpeechOutput,
};
use docsaccess_core::chord::NativeCommand;
use docsaccess_core::config::DeferredSpeechTimings;
use docsaccess_core::types::TextUnit;
use std::sync::Arc;
use std::time::Duration;

/// Executes dispatch-table actions against the host collaborators.
pub struct DocsAccessEngine {
    state: Arc<AddonState>,
    focus: Arc<dyn FocusProvider>,
    speech: Arc<dyn SpeechOutput>,
    scheduler: Arc<dyn Scheduler>,
    injector: Arc<dyn InputInjector>,
    suppressor: Arc<dyn InjectionSuppressor>,
    timings: DeferredSpeechTimings,
}

impl DocsAccessEngine {
    pub fn new(
        state: Arc<AddonState>,
        focus: Arc<dyn FocusProvider>,
        speech: Arc<dyn SpeechOutput>,
        scheduler: Arc<dyn Scheduler>,
        injector: Arc<dyn InputInjector>,
        suppressor: Arc<dyn InjectionSuppressor>,
        timings: DeferredSpeechTimings,
    ) -> Self {
        Self {
            state,
            focus,
            speech,
            scheduler,
            injector,
            suppressor,
            timings,
        }
    }

    pub fn execute(&self, action: &OverrideAction, gesture: &dyn Gesture) -> anyhow::Result<()> {
        match action {
            OverrideAction::NativeCommand(command) => self.send_native_command(command),
            OverrideAction::PassThrough { unit } => {
                gesture.send();
                if let Some(unit) = unit {
                    self.arm_deferred_speech(*unit);
                }
                Ok(())
            }
        }
    }

    /// Injects the accelerator chord with self-interception suppressed
    /// for the duration of the submission.
    pub fn send_native_command(&self, command: &NativeCommand) -> anyhow::Result<()> {
        let events = command.events()?;
        let _scope = SuppressionScope::new(self.suppressor.as_ref());
        self.injector.inject(&events)
    }

    /// Spawns a settle-and-speak task for `unit`, captured against the
    /// current generation.
    pub fn arm_deferred_speech(&self, unit: TextUnit) {
        let task = DeferredSpeech::new(unit, self.state.generation(), self.timings.clone());
        let delay = task.initial_delay();
        schedule_step(
            Arc::clone(&self.scheduler),
            Arc::clone(&self.focus),
            Arc::clone(&self.speech),
            Arc::clone(&self.state),
            task,
            delay,
        );
    }
}

/// Drives a [`DeferredSpeech`] task through the host's one-shot timer,
/// re-arming itself after every `Reschedule` so the host's event
/// processing interleaves between slices.
fn schedule_step(
    scheduler: Arc<dyn Scheduler>,
    focus: Arc<dyn FocusProvider>,
    speech: Arc<dyn SpeechOutput>,
    state: Arc<AddonState>,
    mut task: DeferredSpeech,
    delay: Duration,
) {
    let rearm = Arc::clone(&scheduler);
    scheduler.call_later(
        delay,
        Box::new(move || {
            match task.step(focus.as_ref(), speech.as_ref(), state.generation()) {
                StepOutcome::Reschedule(next) => {
                    schedule_step(rearm, focus, speech, state, task, next);
                }
                StepOutcome::Finished(_) => {}
            }
        }),
    );
}

/// RAII bracket around injection; the suppressor is released even if
/// the injector errors.
struct SuppressionScope<'a> {
    suppressor: &'a dyn InjectionSuppressor,
}

impl<'a> SuppressionScope<'a> {
    fn new(suppressor: &'a dyn InjectionSuppressor) -> Self {
        suppressor.begin();
        Self { suppressor }
    }
}

impl Drop for SuppressionScope<'_> {
    fn drop(&mut self) {
        self.suppressor.end();
    }
}
