//! Router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Root target redirect (public)
//! - `GET  /{code}`  - Short link redirect (public); `/.list` lists links (`auth` required)
//! - `POST /`        - Create a link with a generated code (`auth` required)
//! - `POST /{code}`  - Create a link with an explicit code (`auth` required)
//! - anything else   - Same pipelines, always rejected as an invalid code
//!
//! Other methods on `/` and `/{code}` get `405 Method Not Allowed`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Body limit** - Disabled; creation bodies are stored whole

use crate::api::handlers::{
    create_handler, create_root_handler, fallback_handler, redirect_handler,
    redirect_root_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_root_handler).post(create_root_handler))
        .route("/{code}", get(redirect_handler).post(create_handler))
        .fallback(fallback_handler)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(tracing::layer())
}
