//! Handler for short code resolution.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::handlers::list::list_links;
use crate::api::middleware::auth::AuthKey;
use crate::domain::entities::SpecialCode;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its stored target.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. `.list` is handed to the lister
/// 2. A notification is queued if notifications are enabled (never waits)
/// 3. The code is read from the store, falling back to `.fallback`
/// 4. Return 302 Found
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist and there is no fallback.
/// Returns 500 Internal Server Error on storage failures.
///
/// A path that does not percent-decode to UTF-8 names no storable code and
/// goes straight to the fallback.
pub async fn redirect_handler(
    State(state): State<AppState>,
    code: Result<Path<String>, PathRejection>,
    auth: AuthKey,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    match code {
        Ok(Path(code)) => resolve(&state, &code, &auth, &headers, &uri).await,
        Err(rejection) => {
            debug!(path = %uri.path(), "undecodable code: {}", rejection);
            let target = state.link_service.fallback().await?;
            found(&target)
        }
    }
}

/// Redirects to the root target.
///
/// # Endpoint
///
/// `GET /`
pub async fn redirect_root_handler(
    State(state): State<AppState>,
    auth: AuthKey,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    resolve(&state, "", &auth, &headers, &uri).await
}

/// Shared GET pipeline for a code already stripped of its leading `/`.
pub(crate) async fn resolve(
    state: &AppState,
    code: &str,
    auth: &AuthKey,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<Response, AppError> {
    if code == SpecialCode::List.as_str() {
        return list_links(state, auth, headers, uri).await;
    }

    if let Some(notify) = &state.notify_service {
        let notified = if code.is_empty() {
            SpecialCode::Root.as_str()
        } else {
            code
        };
        notify.dispatch(notified);
    }

    let target = state.link_service.resolve(code).await?;

    found(&target)
}

/// Builds a 302 response pointing at `target`.
fn found(target: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(target)
        .map_err(|e| AppError::internal(format!("invalid redirect target {:?}: {}", target, e)))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
