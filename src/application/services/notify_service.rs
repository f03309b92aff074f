//! Non-blocking hand-off of resolved codes to the notification worker.

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::domain::notify_event::NotifyEvent;

/// Producer side of the bounded notification queue.
///
/// [`NotifyService::dispatch`] never waits: when the queue is full the event
/// is dropped and logged, so a slow webhook cannot hold up redirects.
#[derive(Debug, Clone)]
pub struct NotifyService {
    sender: mpsc::Sender<NotifyEvent>,
}

impl NotifyService {
    pub fn new(sender: mpsc::Sender<NotifyEvent>) -> Self {
        Self { sender }
    }

    /// Queues a notification for `code`.
    ///
    /// Returns true if the event was queued.
    pub fn dispatch(&self, code: &str) -> bool {
        match self.sender.try_send(NotifyEvent::new(code)) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(code = %event.code, "notification queue full, dropping event");
                false
            }
            Err(TrySendError::Closed(event)) => {
                debug!(code = %event.code, "notification queue closed, dropping event");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dispatch_queues_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let service = NotifyService::new(tx);

        assert!(service.dispatch("abc"));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.code, "abc");
    }

    #[tokio::test]
    async fn test_dispatch_drops_when_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let service = NotifyService::new(tx);

        assert!(service.dispatch("first"));
        assert!(!service.dispatch("second"));

        assert_eq!(rx.try_recv().unwrap().code, "first");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dispatch_after_worker_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let service = NotifyService::new(tx);

        assert!(!service.dispatch("late"));
    }
}
