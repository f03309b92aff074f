//! Background worker delivering notifications for opted-in codes.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::notification_sink::NotificationSink;
use crate::domain::notify_event::NotifyEvent;
use crate::error::NotifyError;
use crate::utils::code_generator::validate_code;

/// Limits applied by [`run_notify_worker`].
#[derive(Debug, Clone, Copy)]
pub struct NotifyWorkerSettings {
    /// Maximum outbound calls in flight at once.
    pub concurrency: usize,
    /// Upper bound on a single outbound call.
    pub call_timeout: Duration,
}

/// Outcome of handling a single event.
#[derive(Debug, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The code has no opt-in file in the notification directory.
    NotOptedIn,
}

/// Consumes notification events until every sender is dropped.
///
/// For each event the worker checks for `<notify_dir>/<code>` and, if it
/// exists, hands the event to `sink` under `settings.call_timeout`. At most
/// `settings.concurrency` deliveries run at once; while they are all busy the
/// worker stops pulling from the queue, so producers see a full channel
/// instead of an ever-growing task list.
///
/// Once the channel closes, queued events are drained and in-flight calls are
/// awaited before the function returns.
pub async fn run_notify_worker(
    mut rx: mpsc::Receiver<NotifyEvent>,
    notify_dir: PathBuf,
    sink: Arc<dyn NotificationSink>,
    settings: NotifyWorkerSettings,
) {
    let permits = Arc::new(Semaphore::new(settings.concurrency.max(1)));
    let mut in_flight = JoinSet::new();
    let notify_dir = Arc::new(notify_dir);

    info!(
        "Notify worker started (sink: {}, dir: {})",
        sink.name(),
        notify_dir.display()
    );

    while let Some(event) = rx.recv().await {
        while in_flight.try_join_next().is_some() {}

        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let sink = sink.clone();
        let notify_dir = notify_dir.clone();
        let call_timeout = settings.call_timeout;

        in_flight.spawn(async move {
            let _permit = permit;
            match deliver(&notify_dir, sink.as_ref(), &event, call_timeout).await {
                Ok(Delivery::Sent) => debug!(code = %event.code, "notification sent"),
                Ok(Delivery::NotOptedIn) => {}
                Err(e) => warn!(code = %event.code, "notification failed: {}", e),
            }
        });
    }

    while in_flight.join_next().await.is_some() {}

    info!("Notify worker stopped");
}

/// Checks the opt-in file for `event.code` and delivers it if present.
///
/// # Errors
///
/// Returns [`NotifyError::Timeout`] if the sink does not answer within
/// `call_timeout`, or whatever the sink itself reports.
pub async fn deliver(
    notify_dir: &Path,
    sink: &dyn NotificationSink,
    event: &NotifyEvent,
    call_timeout: Duration,
) -> Result<Delivery, NotifyError> {
    if validate_code(&event.code).is_err() {
        return Ok(Delivery::NotOptedIn);
    }

    match tokio::fs::try_exists(notify_dir.join(&event.code)).await {
        Ok(true) => {}
        Ok(false) => return Ok(Delivery::NotOptedIn),
        Err(e) => {
            warn!(code = %event.code, "cannot check notification opt-in: {}", e);
            return Ok(Delivery::NotOptedIn);
        }
    }

    tokio::time::timeout(call_timeout, sink.send(event))
        .await
        .map_err(|_| NotifyError::Timeout(call_timeout))??;

    Ok(Delivery::Sent)
}
