//! # ptsrv
//!
//! A small short-code redirect service. Every short code is a regular file in
//! a storage directory; the file content is the redirect target.
//!
//! ## Architecture
//!
//! The crate keeps a layered layout:
//!
//! - **Domain Layer** ([`domain`]) - Links, special codes, notification events and ports
//! - **Application Layer** ([`application`]) - Resolution, creation, listing and auth rules
//! - **Infrastructure Layer** ([`infrastructure`]) - Filesystem store and Pushover client
//! - **API Layer** ([`api`]) - HTTP handlers and extractors
//!
//! ## Features
//!
//! - `GET /<code>` redirects (302) to the stored target, with root and fallback targets
//! - `POST /<code>` creates a link exactly once, `POST /` generates a 4-character code
//! - `GET /.list` lists every link as JSON or text, gated by a shared secret
//! - Opt-in, non-blocking Pushover notifications per code
//!
//! ## Quick Start
//!
//! ```bash
//! export PT_DIR=/srv/links
//! export PT_AUTH=s3cret          # Optional, enables listing and creation
//!
//! cargo run -- :4600
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LinkService, NotifyService};
    pub use crate::domain::entities::{Link, SpecialCode};
    pub use crate::domain::notify_event::NotifyEvent;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::FsLinkRepository;
    pub use crate::routes::app_router;
    pub use crate::state::AppState;
}
