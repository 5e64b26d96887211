//! Session lifecycle monitor.
//!
//! Polls the credential store at a fixed cadence, emits a one-shot advance
//! warning when the session enters the final minutes of validity, and fires a
//! terminal expired callback when the credential runs out. The monitor is an
//! advisory layer only; the server remains the authority on credential
//! validity.
//!
//! One monitor instance is meant to exist per process, constructed at
//! application start and shared by cloning the handle. The auth owner calls
//! [`SessionMonitor::start`] after a successful login is persisted and
//! [`SessionMonitor::stop`] on every logout path, including from within its
//! own `on_expired` wiring.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::claims;
use crate::config::MonitorConfig;
use crate::store::TokenStore;

pub type ExpiredHandler = Arc<dyn Fn() + Send + Sync>;
pub type WarningHandler = Arc<dyn Fn(i64) + Send + Sync>;

/// Handlers invoked from the polling tick.
///
/// At most one handler per event. Registration is replace-all: the registry
/// passed to [`SessionMonitor::register_callbacks`] becomes the whole truth,
/// and any slot left empty clears the previous handler. This keeps a stale
/// handler from an earlier screen from firing after navigation.
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    on_expired: Option<ExpiredHandler>,
    on_warning: Option<WarningHandler>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler for confirmed expiry. Typically wired to logout + navigation.
    pub fn on_expired(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_expired = Some(Arc::new(handler));
        self
    }

    /// Handler for approaching expiry. Receives the remaining whole minutes,
    /// rounded down.
    pub fn on_warning(mut self, handler: impl Fn(i64) + Send + Sync + 'static) -> Self {
        self.on_warning = Some(Arc::new(handler));
        self
    }
}

#[derive(Default)]
struct MonitorState {
    /// Ownership of the active poll task; present only while monitoring.
    poll_handle: Option<JoinHandle<()>>,
    /// One-shot flag: the warning fired during this monitoring cycle.
    warning_emitted: bool,
}

struct Inner {
    store: Arc<dyn TokenStore>,
    config: MonitorConfig,
    state: Mutex<MonitorState>,
    callbacks: Mutex<CallbackRegistry>,
}

/// Process-wide session clock.
///
/// Cloning yields another handle to the same monitor. Swapping a refreshed
/// credential into the store mid-cycle does not re-arm the warning one-shot;
/// callers replacing the credential must `stop()` and `start()` so the new
/// cycle begins with a clear flag.
#[derive(Clone)]
pub struct SessionMonitor {
    inner: Arc<Inner>,
}

impl SessionMonitor {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self::with_config(store, MonitorConfig::default())
    }

    pub fn with_config(store: Arc<dyn TokenStore>, config: MonitorConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                config,
                state: Mutex::new(MonitorState::default()),
                callbacks: Mutex::new(CallbackRegistry::default()),
            }),
        }
    }

    /// Begin monitoring. Idempotent: a second call while active is a no-op.
    ///
    /// Runs one status check immediately, so a credential that is already
    /// expired fires `on_expired` synchronously within this call and leaves
    /// the monitor inactive. Otherwise a poll task is armed at the configured
    /// interval. Must be called within a Tokio runtime.
    pub fn start(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if state.poll_handle.is_some() {
                debug!("Session monitor already active");
                return;
            }
            state.warning_emitted = false;
        }

        if !self.check_now() {
            return;
        }

        let monitor = self.clone();
        let interval = self.inner.config.poll_interval();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first interval tick completes immediately; start() already
            // ran that check.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !monitor.check_now() {
                    break;
                }
            }
        });

        let mut state = self.inner.state.lock().unwrap();
        if state.poll_handle.is_some() {
            // An overlapping start() armed a poll task first; keep the
            // established cycle rather than leaking it.
            handle.abort();
            return;
        }
        state.poll_handle = Some(handle);
        info!(
            interval_secs = interval.as_secs(),
            "Session monitor started"
        );
    }

    /// Stop monitoring. Idempotent: safe to call when already inactive.
    pub fn stop(&self) {
        self.deactivate();
        debug!("Session monitor stopped");
    }

    /// Run one status check.
    ///
    /// This is the same check the poll task runs each tick. Returns whether
    /// monitoring continues: `false` means the monitor deactivated itself,
    /// either because the credential is gone or because it expired.
    pub fn check_now(&self) -> bool {
        let Some(token) = self.inner.store.get() else {
            // An absent credential means logout already happened elsewhere;
            // it is not itself an expiry event.
            debug!("No credential in store, stopping session monitor");
            self.deactivate();
            return false;
        };

        let now = Utc::now();

        if claims::is_expired(&token, now) {
            info!("Credential expired, terminating session");
            let handler = self.inner.callbacks.lock().unwrap().on_expired.clone();
            if let Some(handler) = handler {
                handler();
            }
            self.deactivate();
            return false;
        }

        let remaining = claims::time_remaining(&token, now);
        if remaining <= self.inner.config.warning_band() {
            let fire = {
                let mut state = self.inner.state.lock().unwrap();
                !std::mem::replace(&mut state.warning_emitted, true)
            };
            if fire {
                let minutes = remaining.num_minutes();
                info!(minutes_left = minutes, "Session expiring soon");
                let handler = self.inner.callbacks.lock().unwrap().on_warning.clone();
                if let Some(handler) = handler {
                    handler(minutes);
                }
            }
        } else {
            debug!(
                seconds_remaining = remaining.num_seconds(),
                "Session check passed"
            );
        }

        true
    }

    /// Replace the whole callback registry. See [`CallbackRegistry`] for the
    /// replace-all semantics.
    pub fn register_callbacks(&self, callbacks: CallbackRegistry) {
        *self.inner.callbacks.lock().unwrap() = callbacks;
    }

    /// Whether a credential is present and not expired right now.
    ///
    /// Side-effect free; usable for guard checks outside the polling cycle.
    pub fn has_valid_session(&self) -> bool {
        match self.inner.store.get() {
            Some(token) => !claims::is_expired(&token, Utc::now()),
            None => false,
        }
    }

    /// Whether a poll task is currently armed.
    pub fn is_active(&self) -> bool {
        self.inner.state.lock().unwrap().poll_handle.is_some()
    }

    /// Subject claim of the stored credential, if any.
    pub fn subject(&self) -> Option<String> {
        self.inner
            .store
            .get()
            .and_then(|token| claims::subject_of(&token))
    }

    /// Release the poll task and reset the one-shot flag.
    ///
    /// Aborting from within the task's own tick is fine: the abort lands at
    /// the next await point and the tick loop also breaks on the `false`
    /// return from `check_now`.
    fn deactivate(&self) {
        let mut state = self.inner.state.lock().unwrap();
        if let Some(handle) = state.poll_handle.take() {
            handle.abort();
        }
        state.warning_emitted = false;
    }
}

// ============================================================================
// Tests
// ============================================================================
