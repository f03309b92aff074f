//! Pushover-backed notification sink.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::domain::notification_sink::NotificationSink;
use crate::domain::notify_event::NotifyEvent;
use crate::error::NotifyError;

/// Pushover message endpoint.
pub const PUSHOVER_ENDPOINT: &str = "https://api.pushover.net/1/messages.json";

const MESSAGE_TITLE: &str = "ptsrv received a request";

/// A Pushover `user:token` pair.
#[derive(Clone, PartialEq, Eq)]
pub struct PushoverCredentials {
    pub user: String,
    pub token: String,
}

/// Raised when `PUSHOVER_CREDENTIALS` is not of the form `user:token`.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("credentials must be on the format 'user:token'")]
pub struct InvalidCredentials;

impl FromStr for PushoverCredentials {
    type Err = InvalidCredentials;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(user), Some(token), None) if !user.is_empty() && !token.is_empty() => {
                Ok(Self {
                    user: user.to_string(),
                    token: token.to_string(),
                })
            }
            _ => Err(InvalidCredentials),
        }
    }
}

impl fmt::Debug for PushoverCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushoverCredentials")
            .field("user", &self.user)
            .field("token", &"***")
            .finish()
    }
}

/// Sends a Pushover message for every delivered event.
///
/// The HTTP client carries its own timeout as a second line of defence
/// behind the worker's per-call timeout.
pub struct PushoverNotifier {
    client: Client,
    endpoint: String,
    credentials: PushoverCredentials,
}

impl PushoverNotifier {
    /// Builds a notifier posting to [`PUSHOVER_ENDPOINT`].
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Transport`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(credentials: PushoverCredentials, timeout: Duration) -> Result<Self, NotifyError> {
        Self::with_endpoint(credentials, timeout, PUSHOVER_ENDPOINT)
    }

    /// Builds a notifier posting to a custom endpoint.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn with_endpoint(
        credentials: PushoverCredentials,
        timeout: Duration,
        endpoint: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = endpoint.into();

        info!("Pushover notifications enabled (endpoint: {})", endpoint);

        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }
}

#[async_trait]
impl NotificationSink for PushoverNotifier {
    async fn send(&self, event: &NotifyEvent) -> Result<(), NotifyError> {
        let message = event.message();
        let timestamp = event.received_at.timestamp().to_string();

        let form = [
            ("title", MESSAGE_TITLE),
            ("message", message.as_str()),
            ("user", self.credentials.user.as_str()),
            ("token", self.credentials.token.as_str()),
            ("timestamp", timestamp.as_str()),
            ("retry", "30"),
            ("expire", "120"),
        ];

        let response = self.client.post(&self.endpoint).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "pushover"
    }
}
