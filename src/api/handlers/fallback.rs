//! Handler for paths that do not fit a single-segment route.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
};

use crate::api::handlers::{create::create, redirect::resolve};
use crate::api::middleware::auth::AuthKey;
use crate::error::AppError;
use crate::state::AppState;

/// Applies the normal pipelines to multi-segment paths such as `/a/b`.
///
/// Such a code can never be a stored file name, so GET ends in the fallback
/// target or 404 and POST ends in a conflict, after the usual auth checks.
pub async fn fallback_handler(
    State(state): State<AppState>,
    method: Method,
    auth: AuthKey,
    headers: HeaderMap,
    uri: Uri,
    body: Bytes,
) -> Response {
    let code = raw_code(&uri).to_string();

    let result = match method {
        Method::GET | Method::HEAD => resolve(&state, &code, &auth, &headers, &uri).await,
        Method::POST => create(&state, &code, &auth, &body)
            .await
            .map(IntoResponse::into_response),
        _ => Err(AppError::MethodNotAllowed),
    };

    result.unwrap_or_else(IntoResponse::into_response)
}

/// The request path without its leading `/`, left percent-encoded: any path
/// reaching this handler spans several segments and is rejected either way.
fn raw_code(uri: &Uri) -> &str {
    uri.path().strip_prefix('/').unwrap_or(uri.path())
}
