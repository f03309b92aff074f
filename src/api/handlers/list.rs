//! Listing of all stored links.

use axum::{
    Json,
    http::{HeaderMap, Uri, header},
    response::{IntoResponse, Response},
};

use crate::api::middleware::auth::AuthKey;
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every non-special link.
///
/// # Endpoint
///
/// `GET /.list` (requires `auth`)
///
/// # Formats
///
/// - `?json` or `Accept: application/json` - JSON array of `{code, target}`
/// - otherwise - plain text, `code\ntarget\n\n` per link
///
/// # Errors
///
/// Returns 403 Forbidden if no secret is configured.
/// Returns 401 Unauthorized if the supplied secret is wrong.
/// Returns 500 Internal Server Error if the store cannot be enumerated.
pub async fn list_links(
    state: &AppState,
    auth: &AuthKey,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<Response, AppError> {
    state.auth_service.authorize(&auth.candidates())?;

    let links = state.link_service.list().await?;

    if wants_json(headers, uri) {
        Ok(Json(links).into_response())
    } else {
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_text(&links),
        )
            .into_response())
    }
}

/// True if the request asks for structured output.
fn wants_json(headers: &HeaderMap, uri: &Uri) -> bool {
    let json_flag = uri.query().is_some_and(|q| {
        url::form_urlencoded::parse(q.as_bytes()).any(|(key, _)| key == "json")
    });

    let accepts_json = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"));

    json_flag || accepts_json
}

fn render_text(links: &[Link]) -> String {
    links
        .iter()
        .map(|link| format!("{}\n{}\n\n", link.code, link.target))
        .collect()
}
