//! HTTP request handlers.
//!
//! - [`redirect`] - `GET /` and `GET /{code}`
//! - [`list`] - `GET /.list`, reached through the redirect pipeline
//! - [`create`] - `POST /` and `POST /{code}`
//! - [`fallback`] - paths that are not a single segment

pub mod create;
pub mod fallback;
pub mod list;
pub mod redirect;

pub use create::{create_handler, create_root_handler};
pub use fallback::fallback_handler;
pub use redirect::{redirect_handler, redirect_root_handler};
