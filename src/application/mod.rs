//! Application layer services implementing the request pipelines.
//!
//! Services consume domain ports and give HTTP handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Resolution, creation and listing of links
//! - [`services::auth_service::AuthService`] - Shared-secret gate
//! - [`services::notify_service::NotifyService`] - Non-blocking notification dispatch

pub mod services;
