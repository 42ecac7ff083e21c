use docsaccess_core::config::AddonConfig;
use docsaccess_engine::dispatch::DispatchTable;
use docsaccess_engine::engine::DocsAccessEngine;
use docsaccess_engine::interceptor::{
    GestureInterceptor, Resolution, TableNavSource, TableNavTarget,
};
use docsaccess_engine::state::AddonState;
use docsaccess_engine::tracker::EditorTracker;
use docsaccess_engine::traits::{
    FocusNotifier, FocusProvider, Gesture, HostDispatch, HostScript, InjectionSuppressor,
    InputInjector, MainThreadExecutor, Scheduler, SpeechOutput, Subscription, UrlSource,
};
use std::sync::Arc;

/// Accelerator the host binds to [`AddonService::toggle`].
pub const TOGGLE_GESTURE: &str = "kb:nvda+alt+g";

const MSG_ENABLED: &str = "Enabled Google Docs accessibility layer";
const MSG_DISABLED: &str = "Disabled Google Docs accessibility layer";
const MSG_NOT_INITIALIZED: &str = "Google Docs accessibility layer is not initialized";
const MSG_INIT_FAILED: &str =
    "Google Docs accessibility layer could not register for focus notifications; \
     the host is too old. The layer will stay inactive.";

/// Short user-facing announcements and dialogs.
pub trait UserInterface: Send + Sync {
    fn message(&self, text: &str);
    fn error_dialog(&self, text: &str);
}

/// Everything the host hands us at activation.
pub struct HostBindings {
    pub dispatch: Arc<dyn HostDispatch>,
    pub focus: Arc<dyn FocusProvider>,
    pub url: Arc<dyn UrlSource>,
    pub speech: Arc<dyn SpeechOutput>,
    pub scheduler: Arc<dyn Scheduler>,
    pub injector: Arc<dyn InputInjector>,
    pub suppressor: Arc<dyn InjectionSuppressor>,
    pub main_thread: Arc<dyn MainThreadExecutor>,
    pub notifier: Arc<dyn FocusNotifier>,
    pub ui: Arc<dyn UserInterface>,
}

/// Plugin lifecycle: built at activation, torn down on drop.
///
/// The host routes its gesture resolution through [`resolve_script`]
/// (or the combined [`dispatch_gesture`]) while this service is alive;
/// dropping it releases the notifier subscription and the host falls
/// back to its own resolver.
///
/// [`resolve_script`]: AddonService::resolve_script
/// [`dispatch_gesture`]: AddonService::dispatch_gesture
pub struct AddonService {
    state: Arc<AddonState>,
    interceptor: GestureInterceptor,
    engine: DocsAccessEngine,
    ui: Arc<dyn UserInterface>,
    subscription: Option<Subscription>,
}

impl AddonService {
    pub fn start(config: AddonConfig, host: HostBindings) -> Self {
        let state = Arc::new(AddonState::new(config.start_enabled));

        let tracker = Arc::new(EditorTracker::new(
            Arc::clone(&state),
            Arc::clone(&host.url),
            Arc::clone(&host.focus),
            Arc::clone(&host.main_thread),
        ));
        let callback_tracker = Arc::clone(&tracker);
        let subscription = match host
            .notifier
            .subscribe(Box::new(move || callback_tracker.refresh()))
        {
            Ok(subscription) => {
                // Prime the context flag; the user may already be in a
                // document when the add-on loads.
                tracker.refresh();
                Some(subscription)
            }
            Err(err) => {
                log::error!("focus notification registration failed: {err}");
                host.ui.error_dialog(MSG_INIT_FAILED);
                state.set_enabled(false);
                None
            }
        };

        let interceptor = GestureInterceptor::new(
            host.dispatch,
            DispatchTable::docs_defaults(),
            Arc::clone(&state),
        );
        let engine = DocsAccessEngine::new(
            Arc::clone(&state),
            host.focus,
            host.speech,
            host.scheduler,
            host.injector,
            host.suppressor,
            config.deferred_speech,
        );

        Self {
            state,
            interceptor,
            engine,
            ui: host.ui,
            subscription,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn state(&self) -> &Arc<AddonState> {
        &self.state
    }

    pub fn resolve_script(&self, gesture: &dyn Gesture) -> Resolution {
        self.interceptor.resolve_script(gesture)
    }

    /// Resolves and, when overridden, executes in one call. Returns the
    /// host's script when the gesture is not ours; `None` means the
    /// gesture was fully handled here.
    pub fn dispatch_gesture(&self, gesture: &dyn Gesture) -> anyhow::Result<Option<HostScript>> {
        match self.interceptor.resolve_script(gesture) {
            Resolution::Host(script) => Ok(script),
            Resolution::Override(action) => {
                self.engine.execute(&action, gesture)?;
                Ok(None)
            }
        }
    }

    pub fn table_navigation_target(&self, source: TableNavSource) -> TableNavTarget {
        self.interceptor.table_navigation_target(source)
    }

    /// Bound to [`TOGGLE_GESTURE`]. Refuses to toggle while
    /// uninitialized and says so.
    pub fn toggle(&self) {
        if self.subscription.is_none() {
            self.ui.message(MSG_NOT_INITIALIZED);
            return;
        }
        let msg = if self.state.toggle() {
            MSG_ENABLED
        } else {
            MSG_DISABLED
        };
        log::info!("{msg}");
        self.ui.message(msg);
    }
}
