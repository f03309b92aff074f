//! Filesystem repository implementation.
//!
//! # Repositories
//!
//! - [`FsLinkRepository`] - One file per code under a root directory

pub mod fs_link_repository;

pub use fs_link_repository::FsLinkRepository;
