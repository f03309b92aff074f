//! Outbound notification port.

use async_trait::async_trait;

use crate::domain::notify_event::NotifyEvent;
use crate::error::NotifyError;

/// Destination for notifications about resolved codes.
///
/// # Implementations
///
/// - [`crate::infrastructure::notify::PushoverNotifier`] - HTTP webhook
/// - [`crate::infrastructure::notify::NullNotifier`] - logs only
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers one notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] on transport failure or a non-success status.
    async fn send(&self, event: &NotifyEvent) -> Result<(), NotifyError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
