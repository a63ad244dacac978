//! Notification sink for user-visible messages

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of notification, selects how the message is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Default,
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Default => write!(f, "default"),
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

/// Trait for showing notifications to the user
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Notifier that writes to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Error => tracing::error!("{}", message),
            NotificationKind::Warning => tracing::warn!("{}", message),
            _ => tracing::info!("[{}] {}", kind, message),
        }
    }
}

/// Notifier that drops everything, used when notifications are disabled
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        tracing::trace!("Suppressed {} notification: {}", kind, message);
    }
}
