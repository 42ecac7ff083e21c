use crate::traits::{FocusProvider, SpeechOutput};
use docsaccess_core::config::DeferredSpeechTimings;
use docsaccess_core::types::TextUnit;
use std::time::Duration;

/// What the driver should do after a step.
#[derive(Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Reschedule(Duration),
    Finished(FinishReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The unit text changed after the first sample; the final version
    /// was spoken.
    Settled,
    /// The text never changed within the window; the recorded sample
    /// was spoken once at the end.
    SpokeAtTimeout,
    /// A newer keystroke bumped the generation counter; spoke nothing.
    Superseded,
    /// No sample could be read before the window closed; spoke nothing.
    TimedOut,
}

/// Settle-and-speak task armed after a pass-through navigation
/// keystroke.
///
/// Docs updates its surface asynchronously after a caret move, so the
/// first sample is recorded silently and only spoken once it either
/// changes (the repaint landed) or survives the whole window unchanged.
/// Cancellation is purely the generation comparison; there is no cancel
/// call, a newer keystroke simply makes older tasks exit silently.
///
/// Elapsed time is accounted as the sum of granted reschedule delays,
/// which keeps the machine deterministic under a manual scheduler.
#[derive(Debug)]
pub struct DeferredSpeech {
    unit: TextUnit,
    generation: u64,
    timings: DeferredSpeechTimings,
    elapsed: Duration,
    recorded: Option<String>,
}

impl DeferredSpeech {
    pub fn new(unit: TextUnit, generation: u64, timings: DeferredSpeechTimings) -> Self {
        Self {
            unit,
            generation,
            timings,
            elapsed: Duration::ZERO,
            recorded: None,
        }
    }

    /// Delay before the first step may run.
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.timings.settle_delay_ms)
    }

    /// One cooperative slice; never blocks. The driver calls this after
    /// each granted delay and either reschedules or drops the task.
    pub fn step(
        &mut self,
        focus: &dyn FocusProvider,
        speech: &dyn SpeechOutput,
        live_generation: u64,
    ) -> StepOutcome {
        if live_generation != self.generation {
            return StepOutcome::Finished(FinishReason::Superseded);
        }
        if self.elapsed >= Duration::from_millis(self.timings.speak_timeout_ms) {
            return match self.recorded.take() {
                Some(text) => {
                    speech.speak(&text);
                    StepOutcome::Finished(FinishReason::SpokeAtTimeout)
                }
                None => StepOutcome::Finished(FinishReason::TimedOut),
            };
        }
        match focus.unit_text_at_caret(self.unit) {
            Ok(text) => match self.recorded.take() {
                None => {
                    self.recorded = Some(text);
                    self.reschedule()
                }
                Some(previous) if previous != text => {
                    speech.cancel();
                    speech.speak(&text);
                    StepOutcome::Finished(FinishReason::Settled)
                }
                Some(previous) => {
                    self.recorded = Some(previous);
                    self.reschedule()
                }
            },
            Err(err) => {
                // The focus object can be briefly invalid mid-repaint;
                // skip this sample and keep polling.
                log::warn!("caret text read failed, skipping sample: {err:#}");
                self.reschedule()
            }
        }
    }

    fn reschedule(&mut self) -> StepOutcome {
        let interval = Duration::from_millis(self.timings.poll_interval_ms);
        self.elapsed += interval;
        StepOutcome::Reschedule(interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsaccess_core::types::FocusSnapshot;
    use std::sync::Mutex;

    struct ScriptedCaret {
        samples: Mutex<Vec<anyhow::Result<String>>>,
    }

    impl ScriptedCaret {
        fn new(samples: Vec<anyhow::Result<String>>) -> Self {
            Self {
                samples: Mutex::new(samples),
            }
        }
    }

    impl FocusProvider for ScriptedCaret {
        fn focused_snapshot(&self) -> anyhow::Result<FocusSnapshot> {
            anyhow::bail!("not used here")
        }

        fn unit_text_at_caret(&self, _unit: TextUnit) -> anyhow::Result<String> {
            let mut samples = self.samples.lock().unwrap();
            if samples.is_empty() {
                Ok("steady".to_string())
            } else {
                samples.remove(0)
            }
        }
    }

    #[derive(Default)]
    struct RecordingSpeech {
        spoken: Mutex<Vec<String>>,
        cancels: Mutex<usize>,
    }

    impl SpeechOutput for RecordingSpeech {
        fn speak(&self, text: &str) {
            self.spoken.lock().unwrap().push(text.to_string());
        }

        fn cancel(&self) {
            *self.cancels.lock().unwrap() += 1;
        }
    }

    fn drive(
        task: &mut DeferredSpeech,
        focus: &dyn FocusProvider,
        speech: &dyn SpeechOutput,
        generation: u64,
        max_steps: usize,
    ) -> FinishReason {
        for _ in 0..max_steps {
            match task.step(focus, speech, generation) {
                StepOutcome::Reschedule(_) => continue,
                StepOutcome::Finished(reason) => return reason,
            }
        }
        panic!("task did not finish within {max_steps} steps");
    }

    #[test]
    fn stable_text_is_spoken_exactly_once_at_the_end() {
        let focus = ScriptedCaret::new(vec![]);
        let speech = RecordingSpeech::default();
        let mut task = DeferredSpeech::new(TextUnit::Line, 7, DeferredSpeechTimings::default());

        let reason = drive(&mut task, &focus, &speech, 7, 64);
        assert_eq!(reason, FinishReason::SpokeAtTimeout);
        assert_eq!(*speech.spoken.lock().unwrap(), vec!["steady".to_string()]);
        assert_eq!(*speech.cancels.lock().unwrap(), 0);
    }

    #[test]
    fn changed_text_speaks_only_the_final_version() {
        let focus = ScriptedCaret::new(vec![
            Ok("old line".to_string()),
            Ok("old line".to_string()),
            Ok("new line".to_string()),
        ]);
        let speech = RecordingSpeech::default();
        let mut task = DeferredSpeech::new(TextUnit::Line, 1, DeferredSpeechTimings::default());

        let reason = drive(&mut task, &focus, &speech, 1, 8);
        assert_eq!(reason, FinishReason::Settled);
        assert_eq!(*speech.spoken.lock().unwrap(), vec!["new line".to_string()]);
        assert_eq!(*speech.cancels.lock().unwrap(), 1);
    }

    #[test]
    fn superseded_task_speaks_nothing() {
        let focus = ScriptedCaret::new(vec![Ok("line".to_string())]);
        let speech = RecordingSpeech::default();
        let mut task = DeferredSpeech::new(TextUnit::Line, 3, DeferredSpeechTimings::default());

        assert!(matches!(
            task.step(&focus, &speech, 3),
            StepOutcome::Reschedule(_)
        ));
        // A newer keystroke has bumped the live generation.
        let reason = drive(&mut task, &focus, &speech, 4, 1);
        assert_eq!(reason, FinishReason::Superseded);
        assert!(speech.spoken.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_samples_are_skipped_not_fatal() {
        let focus = ScriptedCaret::new(vec![
            Err(anyhow::anyhow!("object went away")),
            Ok("recovered".to_string()),
            Ok("changed".to_string()),
        ]);
        let speech = RecordingSpeech::default();
        let mut task = DeferredSpeech::new(TextUnit::Word, 1, DeferredSpeechTimings::default());

        let reason = drive(&mut task, &focus, &speech, 1, 8);
        assert_eq!(reason, FinishReason::Settled);
        assert_eq!(*speech.spoken.lock().unwrap(), vec!["changed".to_string()]);
    }

    #[test]
    fn all_samples_failing_times_out_silently() {
        struct AlwaysFailing;
        impl FocusProvider for AlwaysFailing {
            fn focused_snapshot(&self) -> anyhow::Result<FocusSnapshot> {
                anyhow::bail!("unused")
            }
            fn unit_text_at_caret(&self, _unit: TextUnit) -> anyhow::Result<String> {
                anyhow::bail!("gone")
            }
        }
        let speech = RecordingSpeech::default();
        let mut task = DeferredSpeech::new(TextUnit::Line, 1, DeferredSpeechTimings::default());

        let reason = drive(&mut task, &AlwaysFailing, &speech, 1, 64);
        assert_eq!(reason, FinishReason::TimedOut);
        assert!(speech.spoken.lock().unwrap().is_empty());
    }
}
