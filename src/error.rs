//! Error types shared by the store, the notifier and the HTTP layer.
//!
//! Every failure is handled at the boundary of the component that caused it:
//! the store reports [`StoreError`], the notifier reports [`NotifyError`] and
//! handlers translate both into [`AppError`], which knows how to render itself
//! as a plain-text HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failures of the file-backed link store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("code not found")]
    NotFound,

    #[error("file already exists")]
    AlreadyExists,

    #[error("invalid code: {0:?}")]
    InvalidCode(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of an outbound notification call.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notification endpoint returned http status {0}")]
    Status(u16),

    #[error("notification timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Request-level error taxonomy.
///
/// | Variant            | Status |
/// |--------------------|--------|
/// | `NotFound`         | 404    |
/// | `Conflict`         | 403    |
/// | `Unauthorized`     | 401    |
/// | `Forbidden`        | 403    |
/// | `MethodNotAllowed` | 405    |
/// | `Internal`         | 500    |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    /// Client-caused clash with existing or reserved state.
    #[error("{0}")]
    Conflict(String),

    #[error("wrong auth key")]
    Unauthorized,

    /// A gated operation was requested but is disabled by configuration.
    #[error("{0}")]
    Forbidden(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    /// Detail is logged server-side and never sent to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AppError::NotFound,
            StoreError::AlreadyExists => AppError::conflict("file already exists"),
            StoreError::InvalidCode(_) => AppError::conflict("invalid code"),
            StoreError::Io(err) => AppError::internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::Internal(detail) => {
                tracing::error!("{}", detail);
                "server error".to_string()
            }
            AppError::Conflict(message) => {
                tracing::info!("conflict: {}", message);
                message
            }
            other => other.to_string(),
        };

        (status, format!("{} - {}\n", status.as_u16(), message)).into_response()
    }
}
