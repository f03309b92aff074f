//! HTTP middleware and extractors for request processing.

pub mod auth;
pub mod tracing;
