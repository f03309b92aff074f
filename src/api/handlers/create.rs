//! Handler for link creation.

use axum::{
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
};
use tracing::info;

use crate::api::middleware::auth::AuthKey;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a link for an explicit code.
///
/// # Endpoint
///
/// `POST /{code}` (requires `auth`)
///
/// The raw request body is stored as the target.
///
/// # Response
///
/// ```text
/// mycode
/// ```
///
/// or `https://s.example.com/mycode` when a base URL is configured.
///
/// # Errors
///
/// Returns 405 Method Not Allowed if no secret is configured.
/// Returns 401 Unauthorized if the supplied secret is wrong.
/// Returns 403 Forbidden for special codes, unsafe codes and existing codes.
/// Returns 500 Internal Server Error if the write fails.
/// A path that does not percent-decode to UTF-8 is an invalid code (403).
pub async fn create_handler(
    State(state): State<AppState>,
    code: Result<Path<String>, PathRejection>,
    auth: AuthKey,
    body: Bytes,
) -> Result<String, AppError> {
    match code {
        Ok(Path(code)) => create(&state, &code, &auth, &body).await,
        Err(_) => {
            authorize_creation(&state, &auth)?;
            Err(AppError::conflict("invalid code"))
        }
    }
}

/// Creates a link under a freshly generated 4-character code.
///
/// # Endpoint
///
/// `POST /` (requires `auth`)
pub async fn create_root_handler(
    State(state): State<AppState>,
    auth: AuthKey,
    body: Bytes,
) -> Result<String, AppError> {
    create(&state, "", &auth, &body).await
}

/// Shared POST pipeline for a code already stripped of its leading `/`.
pub(crate) async fn create(
    state: &AppState,
    code: &str,
    auth: &AuthKey,
    body: &[u8],
) -> Result<String, AppError> {
    authorize_creation(state, auth)?;

    let code = state.link_service.create(code, body).await?;

    info!(code = %code, "link created");

    Ok(format!("{}\n", state.link_service.short_link(&code)))
}

/// Creation is disabled without a secret and gated by it otherwise.
fn authorize_creation(state: &AppState, auth: &AuthKey) -> Result<(), AppError> {
    if !state.auth_service.is_enabled() {
        return Err(AppError::MethodNotAllowed);
    }

    state.auth_service.authorize(&auth.candidates())
}
