//! Formatting and notification helpers shared by the dashboard front-ends: fr-FR rendering of
//! numbers and dates, and the transient notification surface.

#![forbid(unsafe_code)]

pub mod format;
pub mod notify;

pub use format::{DateFormatter, DateLike, format_date, format_number};
pub use notify::{ConsoleNotifier, Notification, Notifier, Severity, ToastBoard};
