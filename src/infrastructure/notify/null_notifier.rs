//! No-op notification sink.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::notification_sink::NotificationSink;
use crate::domain::notify_event::NotifyEvent;
use crate::error::NotifyError;

/// A sink that only writes the notification to the log.
///
/// Used when a notification directory is active but no outbound
/// credentials are configured.
pub struct NullNotifier;

impl NullNotifier {
    pub fn new() -> Self {
        debug!("Using NullNotifier (outbound notifications disabled)");
        Self
    }
}

impl Default for NullNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for NullNotifier {
    async fn send(&self, event: &NotifyEvent) -> Result<(), NotifyError> {
        info!(code = %event.code, "notification (not sent, no credentials)");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
