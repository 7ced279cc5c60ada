//! # Notifications
//!
//! User-visible feedback after a mutation ("Product added", or the backend's
//! error message). The core only builds the triple; presenting it (toast,
//! log line, status bar) is up to the sink.

use std::cell::RefCell;

use serde::Serialize;
use ts_rs::TS;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Severity {
    /// Ordinary confirmation.
    #[default]
    Info,
    /// Failed operation (rendered as a destructive toast).
    Error,
}

/// A (title, description, severity) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notification {
    pub title: String,
    #[ts(optional)]
    pub description: Option<String>,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: None,
            severity: Severity::Info,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Notification {
            title: "Error".to_string(),
            description: Some(description.into()),
            severity: Severity::Error,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Receives notifications. Implementations must not fail.
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

/// Collects notifications in memory (used by tests and headless callers).
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: RefCell<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains everything received so far.
    pub fn take(&self) -> Vec<Notification> {
        self.entries.take()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl NotificationSink for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.entries.borrow_mut().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_collects_and_drains() {
        let log = NotificationLog::new();
        log.notify(Notification::info("Product added").with_description("Fixie A was added to the cart"));
        log.notify(Notification::error("duplicate key"));

        assert_eq!(log.len(), 2);
        let entries = log.take();
        assert!(log.is_empty());

        assert_eq!(entries[0].severity, Severity::Info);
        assert_eq!(entries[1].title, "Error");
        assert!(entries[1].is_error());
    }
}
