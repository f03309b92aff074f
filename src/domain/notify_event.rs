//! Notification event model for asynchronous webhook dispatch.

use chrono::{DateTime, Utc};

/// A resolved code waiting to be checked against the notification directory.
///
/// Created in the redirect handler and sent over a bounded channel to
/// [`crate::domain::notify_worker::run_notify_worker`], so the outbound call
/// never sits on the request path.
#[derive(Debug, Clone)]
pub struct NotifyEvent {
    pub code: String,
    /// When the redirect request arrived, not when the event is delivered.
    pub received_at: DateTime<Utc>,
}

impl NotifyEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            received_at: Utc::now(),
        }
    }

    /// Message body sent to the notification endpoint.
    pub fn message(&self) -> String {
        format!("code: {}", self.code)
    }
}
