//! Redirects flowing through the queue and worker to a sink.

use async_trait::async_trait;
use axum_test::TestServer;
use ptsrv::application::services::{AuthService, LinkService, NotifyService};
use ptsrv::domain::notification_sink::NotificationSink;
use ptsrv::domain::notify_event::NotifyEvent;
use ptsrv::domain::notify_worker::{NotifyWorkerSettings, run_notify_worker};
use ptsrv::error::NotifyError;
use ptsrv::infrastructure::persistence::FsLinkRepository;
use ptsrv::routes::app_router;
use ptsrv::state::AppState;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Default)]
struct RecordingSink {
    codes: Mutex<Vec<String>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, event: &NotifyEvent) -> Result<(), NotifyError> {
        self.codes.lock().unwrap().push(event.code.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[tokio::test]
async fn test_only_opted_in_codes_are_delivered() {
    let root = tempfile::tempdir().unwrap();
    let notify_dir = root.path().join(".notify");
    std::fs::create_dir(&notify_dir).unwrap();
    std::fs::write(root.path().join("watched"), "https://watched.example/").unwrap();
    std::fs::write(root.path().join("quiet"), "https://quiet.example/").unwrap();
    std::fs::write(notify_dir.join("watched"), "").unwrap();
    std::fs::write(notify_dir.join(".root"), "").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let (tx, rx) = mpsc::channel(16);
    let worker = tokio::spawn(run_notify_worker(
        rx,
        notify_dir,
        sink.clone(),
        NotifyWorkerSettings {
            concurrency: 2,
            call_timeout: Duration::from_secs(5),
        },
    ));

    let link_service = Arc::new(LinkService::new(
        Arc::new(FsLinkRepository::new(root.path())),
        None,
        None,
    ));
    let state = AppState::new(
        link_service,
        Arc::new(AuthService::new(None)),
        Some(NotifyService::new(tx)),
    );
    let server = TestServer::new(app_router(state)).unwrap();

    assert_eq!(server.get("/watched").await.status_code(), 302);
    assert_eq!(server.get("/quiet").await.status_code(), 302);
    assert_eq!(server.get("/").await.status_code(), 404);

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while sink.codes.lock().unwrap().len() < 2 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    // Give a stray delivery for "quiet" a chance to show up.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut codes = sink.codes.lock().unwrap().clone();
    codes.sort();
    assert_eq!(codes, vec![".root", "watched"]);

    worker.abort();
}

#[tokio::test]
async fn test_full_queue_does_not_block_redirects() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("code"), "https://example.com/").unwrap();

    // Nobody drains this queue.
    let (tx, _rx) = mpsc::channel(1);
    let state = AppState::new(
        Arc::new(LinkService::new(
            Arc::new(FsLinkRepository::new(root.path())),
            None,
            None,
        )),
        Arc::new(AuthService::new(None)),
        Some(NotifyService::new(tx)),
    );
    let server = TestServer::new(app_router(state)).unwrap();

    for _ in 0..5 {
        let response = server.get("/code").await;
        assert_eq!(response.status_code(), 302);
    }
}
