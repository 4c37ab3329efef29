//! Transient user-facing status messages.

use std::time::{Duration, Instant};

/// Severity of a status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    /// Confirmation of a user action.
    Info,
    /// Non-fatal problem (e.g. favorites could not be saved).
    Warning,
    /// Failed request or fatal startup condition.
    Error,
}

/// One message shown in the status area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// Severity.
    pub level: StatusLevel,
    /// Deadline after which the message is hidden; `None` means persistent.
    pub expires_at: Option<Instant>,
}

/// Single-slot status area. Showing a message replaces the previous one.
#[derive(Clone, Debug)]
pub struct StatusBar {
    /// Message currently shown.
    current: Option<StatusMessage>,
    /// Lifetime of transient messages.
    duration: Duration,
}

impl StatusBar {
    /// Create an empty status area whose transient messages last `duration`.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Show a transient message that expires after the configured duration.
    pub fn show(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.show_at(text, level, Instant::now());
    }

    /// What: Show a transient message as of `now`.
    ///
    /// Inputs:
    /// - `text`, `level`: Message content.
    /// - `now`: Reference instant for the expiry deadline.
    ///
    /// Output:
    /// - Replaces the current message; a zero duration makes the message persistent.
    pub fn show_at(&mut self, text: impl Into<String>, level: StatusLevel, now: Instant) {
        let text = text.into();
        tracing::debug!(?level, text = %text, "[Status] Showing message");
        let expires_at = if self.duration.is_zero() {
            None
        } else {
            Some(now + self.duration)
        };
        self.current = Some(StatusMessage {
            text,
            level,
            expires_at,
        });
    }

    /// What: Drop the current message once its deadline has passed.
    ///
    /// Inputs:
    /// - `now`: Current instant.
    ///
    /// Output:
    /// - `true` when a message was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        if let Some(deadline) = self.current.as_ref().and_then(|m| m.expires_at)
            && now >= deadline
        {
            self.current = None;
            return true;
        }
        false
    }

    /// Message currently shown.
    #[must_use]
    pub const fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}
