//! HTTP layer for request/response handling.
//!
//! This layer translates HTTP requests into service calls and renders the
//! plain-text, redirect or JSON responses.
//!
//! # Modules
//!
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - `auth` extraction and request tracing

pub mod handlers;
pub mod middleware;
