// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session events for the presentation layer.
//!
//! The core never waits on a listener. Events are sent on an unbounded
//! channel and dropped silently once the receiver is gone.

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::Serialize;

use crate::error::Error;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A short user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

impl From<&Error> for Notification {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidAllergen(e) => Self::error(e.to_string()),
            Error::Scan(_) => Self::error("No text detected in image"),
            Error::Acquisition(e) => Self::error(format!("Scan failed: {e}")),
            Error::Storage(e) => Self::warning(format!("Could not save: {e}")),
            other => Self::error(other.to_string()),
        }
    }
}

/// Pipeline stage and completion percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub stage: String,
    pub percent: u8,
}

/// Everything a session reports to its listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SessionEvent {
    Progress(Progress),
    Notice(Notification),
}

/// Sending half of the session event channel.
///
/// A sink without a channel discards everything.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<Sender<SessionEvent>>,
}

impl EventSink {
    /// A sink that discards events.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Create a connected sink and its receiver.
    pub fn channel() -> (Self, Receiver<SessionEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx: Some(tx) }, rx)
    }

    /// Report progress through `stage`, clamping `percent` to 100.
    pub fn progress(&self, stage: &str, percent: u8) {
        self.send(SessionEvent::Progress(Progress {
            stage: stage.to_string(),
            percent: percent.min(100),
        }));
    }

    pub fn notify(&self, notification: Notification) {
        self.send(SessionEvent::Notice(notification));
    }

    fn send(&self, event: SessionEvent) {
        if let Some(tx) = &self.tx
            && tx.send(event).is_err()
        {
            tracing::debug!("event receiver dropped");
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
