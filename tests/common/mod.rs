#![allow(dead_code)]

use axum_test::TestServer;
use ptsrv::application::services::{AuthService, LinkService, NotifyService};
use ptsrv::domain::notify_event::NotifyEvent;
use ptsrv::infrastructure::persistence::FsLinkRepository;
use ptsrv::routes::app_router;
use ptsrv::state::AppState;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

pub const SECRET: &str = "s3cret";

/// Knobs for [`create_test_state`].
#[derive(Default)]
pub struct TestOptions {
    pub auth: Option<&'static str>,
    pub fallback_override: Option<&'static str>,
    pub base_url: Option<&'static str>,
}

impl TestOptions {
    pub fn with_auth() -> Self {
        Self {
            auth: Some(SECRET),
            ..Self::default()
        }
    }
}

pub fn create_test_state(
    root: &Path,
    options: TestOptions,
) -> (AppState, mpsc::Receiver<NotifyEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let repository = Arc::new(FsLinkRepository::new(root));
    let link_service = Arc::new(LinkService::new(
        repository,
        options.fallback_override.map(str::to_string),
        options.base_url.map(str::to_string),
    ));
    let auth_service = Arc::new(AuthService::new(options.auth.map(str::to_string)));

    let state = AppState::new(link_service, auth_service, Some(NotifyService::new(tx)));

    (state, rx)
}

/// A server over a fresh storage directory.
pub struct TestApp {
    pub dir: TempDir,
    pub server: TestServer,
    pub notify_rx: mpsc::Receiver<NotifyEvent>,
}

impl TestApp {
    pub fn new(options: TestOptions) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let (state, notify_rx) = create_test_state(dir.path(), options);
        let server = TestServer::new(app_router(state)).unwrap();

        Self {
            dir,
            server,
            notify_rx,
        }
    }

    /// Writes a link file directly, bypassing the API.
    pub fn write_link(&self, code: &str, content: &str) {
        std::fs::write(self.dir.path().join(code), content).unwrap();
    }

    pub fn read_link(&self, code: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join(code)).ok()
    }
}
