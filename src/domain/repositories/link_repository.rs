//! Repository trait for short link data access.

use crate::domain::entities::Link;
use crate::error::StoreError;
use async_trait::async_trait;

/// Storage interface for links.
///
/// Codes handed to a repository are expected to have passed
/// [`crate::utils::code_generator::validate_code`]; implementations still
/// refuse invalid codes with [`StoreError::InvalidCode`] rather than touching
/// the backing store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::FsLinkRepository`] - one file per code
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Reads the target stored for `code`, with surrounding whitespace trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the code has no entry.
    /// Returns [`StoreError::Io`] on any other storage failure.
    async fn read(&self, code: &str) -> Result<String, StoreError>;

    /// Stores `target` under `code` only if nothing is stored there yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the code is taken; the existing
    /// target is left untouched.
    /// Returns [`StoreError::Io`] on any other storage failure.
    async fn create_exclusive(&self, code: &str, target: &[u8]) -> Result<(), StoreError>;

    /// Lists every stored entry, special codes included, sorted by code.
    ///
    /// Entries whose target cannot be read are returned with a
    /// `read error: ...` placeholder instead of failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the store itself cannot be enumerated.
    async fn list_all(&self) -> Result<Vec<Link>, StoreError>;
}
