//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Filesystem link storage
//! - [`notify`] - Outbound notification sinks (Pushover and no-op implementations)

pub mod notify;
pub mod persistence;
