//! HTTP server initialization and runtime setup.
//!
//! Handles storage and notifier setup, worker spawning, and Axum server lifecycle.

use crate::application::services::{AuthService, LinkService, NotifyService};
use crate::config::Config;
use crate::domain::notification_sink::NotificationSink;
use crate::domain::notify_worker::{NotifyWorkerSettings, run_notify_worker};
use crate::infrastructure::notify::{NullNotifier, PushoverNotifier};
use crate::infrastructure::persistence::FsLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Filesystem link repository
/// - Notification sink (Pushover or NullNotifier) and background worker
/// - Axum HTTP server with graceful shutdown
///
/// On SIGINT or SIGTERM the server stops accepting connections, finishes
/// in-flight requests, then gives the notification worker up to
/// `shutdown_timeout_seconds` to drain.
///
/// # Errors
///
/// Returns an error if:
/// - The notifier cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = Arc::new(FsLinkRepository::new(&config.root_dir));
    let link_service = Arc::new(LinkService::new(
        repository,
        config.fallback_target.clone(),
        config.base_url.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(config.auth_key.clone()));

    let (notify_service, worker) = match spawn_notify_worker(&config)? {
        Some((service, handle)) => (Some(service), Some(handle)),
        None => {
            tracing::info!("Notifications disabled");
            (None, None)
        }
    };

    let state = AppState::new(link_service, auth_service, notify_service);

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router, and with it the last sender, is gone once serve returns.
    if let Some(worker) = worker {
        match tokio::time::timeout(config.shutdown_timeout(), worker).await {
            Ok(Ok(())) => tracing::info!("Notify worker drained"),
            Ok(Err(e)) => tracing::error!("Notify worker failed: {}", e),
            Err(_) => tracing::warn!(
                "Notify worker did not drain within {}s, pending notifications dropped",
                config.shutdown_timeout_seconds
            ),
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Starts the notification worker if a notification directory is active.
fn spawn_notify_worker(config: &Config) -> Result<Option<(NotifyService, JoinHandle<()>)>> {
    let Some(notify_dir) = config.notify_dir.clone() else {
        return Ok(None);
    };

    let sink: Arc<dyn NotificationSink> = match &config.pushover_credentials {
        Some(credentials) => Arc::new(
            PushoverNotifier::new(credentials.clone(), config.notify_timeout())
                .context("failed to build Pushover client")?,
        ),
        None => {
            tracing::warn!(
                "Notify dir {} is active but PUSHOVER_CREDENTIALS is unset, notifications are only logged",
                notify_dir.display()
            );
            Arc::new(NullNotifier::new())
        }
    };

    let (tx, rx) = mpsc::channel(config.notify_queue_capacity);
    let settings = NotifyWorkerSettings {
        concurrency: config.notify_concurrency,
        call_timeout: config.notify_timeout(),
    };

    let handle = tokio::spawn(run_notify_worker(rx, notify_dir, sink, settings));

    Ok(Some((NotifyService::new(tx), handle)))
}

/// Resolves when the process receives Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
