//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, NotifyService};

/// Read-only services built once at startup.
///
/// `notify_service` is `None` when no notification directory is active.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    pub notify_service: Option<NotifyService>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        auth_service: Arc<AuthService>,
        notify_service: Option<NotifyService>,
    ) -> Self {
        Self {
            link_service,
            auth_service,
            notify_service,
        }
    }
}
