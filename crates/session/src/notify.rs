//! User-facing notification side-channel (toasts).

use std::sync::{Arc, Mutex};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Fire-and-forget sink for messages shown to the shopper.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

impl<N> Notifier for Arc<N>
where
    N: Notifier + ?Sized,
{
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity)
    }
}

/// Routes notifications to the log. Default sink when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::warn!(severity = "error", "{message}"),
            Severity::Success => tracing::info!(severity = "success", "{message}"),
            Severity::Info => tracing::info!(severity = "info", "{message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Keeps every notification in memory, for tests and dev tooling.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    inner: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        match self.inner.lock() {
            Ok(list) => list.clone(),
            Err(_) => vec![],
        }
    }

    /// Drain recorded notifications.
    pub fn take(&self) -> Vec<Notification> {
        match self.inner.lock() {
            Ok(mut list) => std::mem::take(&mut *list),
            Err(_) => vec![],
        }
    }

    pub fn last(&self) -> Option<Notification> {
        self.inner.lock().ok()?.last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Ok(mut list) = self.inner.lock() {
            list.push(Notification {
                message: message.to_string(),
                severity,
            });
        }
    }
}
