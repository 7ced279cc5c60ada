//! # Notification Sinks
//!
//! Where storefront notifications end up.
//!
//! - [`TracingSink`] records them as structured log events.
//! - [`ConsoleSink`] prints them for the interactive shell (and logs them).
//!
//! Tests use `pedal_core::notification::NotificationLog`.

use std::io::Write;

use tracing::{error, info};

use pedal_core::{Notification, NotificationSink, Severity};

/// Logs every notification through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        let description = notification.description.as_deref().unwrap_or("");
        match notification.severity {
            Severity::Info => info!(title = %notification.title, description, "notification"),
            Severity::Error => error!(title = %notification.title, description, "notification"),
        }
    }
}

/// Prints notifications to stdout, one line each.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, notification: Notification) {
        TracingSink.notify(notification.clone());

        let marker = match notification.severity {
            Severity::Info => "✓",
            Severity::Error => "✗",
        };
        let line = match &notification.description {
            Some(description) => format!("{} {}: {}", marker, notification.title, description),
            None => format!("{} {}", marker, notification.title),
        };

        // Sinks must not fail; a closed stdout just drops the line.
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", line);
    }
}
