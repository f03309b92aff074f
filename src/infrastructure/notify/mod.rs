//! Outbound notification sinks.
//!
//! Provides two [`crate::domain::notification_sink::NotificationSink`] implementations:
//! - [`PushoverNotifier`] - Posts a message to the Pushover API
//! - [`NullNotifier`] - Logs the notification and does nothing else

mod null_notifier;
mod pushover;

pub use null_notifier::NullNotifier;
pub use pushover::{PUSHOVER_ENDPOINT, PushoverCredentials, PushoverNotifier};
