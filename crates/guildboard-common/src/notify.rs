//! Transient user-facing notifications ("toasts").
//!
//! A [`Notifier`] is anywhere a short message can be shown to the user. [`ToastBoard`] is the
//! on-screen surface: every toast is inserted immediately and removes itself after a fixed
//! lifetime. [`ConsoleNotifier`] shows notifications as log lines for terminal use.

use std::fmt::{Display, Formatter};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

/// Log target of notifications shown by [`ConsoleNotifier`].
pub const TOAST_TARGET: &str = "toast";

/// How long a toast stays visible.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_millis(3000);

/// Intent of a notification; selects its styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Lowercase name, used as the styling modifier (`toast-<name>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message shown to the user for a fixed lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
    severity: Severity,
    lifetime: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity, lifetime: Duration) -> Self {
        Self {
            message: message.into(),
            severity,
            lifetime,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Base class plus the severity modifier, e.g. `"toast toast-error"`.
    pub fn class_name(&self) -> String {
        format!("toast toast-{}", self.severity)
    }
}

/// Somewhere notifications can be shown.
pub trait Notifier: Send + Sync {
    /// Show `message` to the user. Returns immediately; nothing to cancel or query afterwards.
    fn show(&self, message: &str, severity: Severity);

    /// Show an informational message.
    fn info(&self, message: &str) {
        self.show(message, Severity::Info);
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn show(&self, message: &str, severity: Severity) {
        (**self).show(message, severity)
    }
}

struct Toast {
    id: u64,
    notification: Notification,
}

#[derive(Default)]
struct BoardState {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// The visible notification surface.
///
/// Each toast schedules its own removal on a dedicated timer thread, so any number of toasts
/// can be on screen at once and each one leaves on its own schedule.
///
/// ```
/// use std::time::Duration;
/// use guildboard_common::notify::{Notifier, Severity, ToastBoard};
///
/// let board = ToastBoard::with_lifetime(Duration::from_millis(20));
/// board.show("Enregistré", Severity::Success);
/// assert_eq!(board.visible()[0].class_name(), "toast toast-success");
///
/// std::thread::sleep(Duration::from_millis(200));
/// assert!(board.is_empty());
/// ```
#[derive(Clone)]
pub struct ToastBoard {
    state: Arc<Mutex<BoardState>>,
    lifetime: Duration,
}

impl ToastBoard {
    pub fn new() -> Self {
        Self::with_lifetime(NOTIFICATION_LIFETIME)
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(BoardState::default())),
            lifetime,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Notifications currently on screen, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        lock(&self.state)
            .toasts
            .iter()
            .map(|t| t.notification.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, notification: Notification) -> u64 {
        let mut state = lock(&self.state);
        let id = state.next_id;
        state.next_id += 1;
        state.toasts.push(Toast { id, notification });
        id
    }

    fn remove(&self, id: u64) {
        lock(&self.state).toasts.retain(|t| t.id != id);
    }

    fn schedule_removal(&self, id: u64) -> io::Result<()> {
        let board = self.clone();

        thread::Builder::new()
            .name(format!("toast-{id}"))
            .spawn(move || {
                thread::sleep(board.lifetime);
                board.remove(id);
                debug!("toast {id} expired");
            })?;

        Ok(())
    }

    // A toast without a timer would never expire; take it down right away.
    fn abandon(&self, id: u64, err: &io::Error) {
        error!("could not schedule removal of toast {id}: {err}");
        self.remove(id);
    }
}

impl Default for ToastBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastBoard {
    fn show(&self, message: &str, severity: Severity) {
        let id = self.insert(Notification::new(message, severity, self.lifetime));
        debug!("toast {id} shown ({severity}): {message}");
        if let Err(e) = self.schedule_removal(id) {
            self.abandon(id, &e);
        }
    }
}

// A panic while holding the lock cannot leave the toast list half-updated
fn lock(state: &Mutex<BoardState>) -> MutexGuard<'_, BoardState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shows notifications as log events under [`TOAST_TARGET`], for terminal front-ends.
///
/// Error toasts are logged at WARN so that the failure behind them stays the only ERROR event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error | Severity::Warning => warn!(target: TOAST_TARGET, "{message}"),
            Severity::Info | Severity::Success => info!(target: TOAST_TARGET, "{message}"),
        }
    }
}
