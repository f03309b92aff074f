//! Link resolution, creation and listing service.

use std::sync::Arc;

use tracing::warn;

use crate::domain::entities::{Link, SpecialCode};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, StoreError};
use crate::utils::code_generator::{generate_code, validate_code};

/// Service behind the GET and POST pipelines.
///
/// Holds the repository plus the two pieces of configuration that shape
/// responses: an optional fallback target that takes precedence over the
/// `.fallback` file, and an optional base URL for creation responses.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    fallback_override: Option<String>,
    base_url: Option<String>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        fallback_override: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            repository,
            fallback_override: fallback_override.filter(|f| !f.trim().is_empty()),
            base_url: base_url.filter(|b| !b.is_empty()),
        }
    }

    /// Resolves a requested code to the target to redirect to.
    ///
    /// An empty code resolves the root special code. Codes naming another
    /// special code, or that are not path-safe, behave like missing codes.
    /// Stored targets that are empty after trimming also count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is missing and no usable
    /// fallback exists.
    /// Returns [`AppError::Internal`] on storage failures other than "missing".
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let lookup = if code.is_empty() {
            Some(SpecialCode::Root.as_str())
        } else if SpecialCode::is_special(code) || validate_code(code).is_err() {
            None
        } else {
            Some(code)
        };

        let Some(lookup) = lookup else {
            return self.fallback().await;
        };

        match self.repository.read(lookup).await {
            Ok(target) if !target.is_empty() => Ok(target),
            Ok(_) | Err(StoreError::NotFound) | Err(StoreError::InvalidCode(_)) => {
                self.fallback().await
            }
            Err(e) => Err(AppError::internal(format!(
                "failed to read code {:?}: {}",
                lookup, e
            ))),
        }
    }

    /// Returns the fallback target, or [`AppError::NotFound`] if none is usable.
    ///
    /// Read errors other than "missing" are logged and treated as no fallback.
    /// Also used directly for request paths that do not decode to a code.
    pub async fn fallback(&self) -> Result<String, AppError> {
        if let Some(target) = &self.fallback_override {
            return Ok(target.clone());
        }

        match self.repository.read(SpecialCode::Fallback.as_str()).await {
            Ok(target) if !target.is_empty() => Ok(target),
            Ok(_) | Err(StoreError::NotFound) => Err(AppError::NotFound),
            Err(e) => {
                warn!("unexpected error when reading fallback: {}", e);
                Err(AppError::NotFound)
            }
        }
    }

    /// Stores `target` under `code`, generating a code when `code` is empty.
    ///
    /// A generated code is tried exactly once; a collision surfaces as a
    /// conflict instead of being retried.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if:
    /// - `code` is a special code
    /// - `code` is not a safe file name
    /// - `code` already exists (the existing target is unchanged)
    ///
    /// Returns [`AppError::Internal`] if random generation or the write fails.
    pub async fn create(&self, code: &str, target: &[u8]) -> Result<String, AppError> {
        if SpecialCode::is_special(code) {
            return Err(AppError::conflict("cannot use special code"));
        }

        let code = if code.is_empty() {
            generate_code()
                .map_err(|e| AppError::internal(format!("failed to generate code: {}", e)))?
        } else {
            validate_code(code).map_err(|e| AppError::conflict(format!("invalid code: {}", e)))?;
            code.to_string()
        };

        self.repository
            .create_exclusive(&code, target)
            .await
            .map_err(AppError::from)?;

        Ok(code)
    }

    /// Formats the creation response for `code`, prefixed with the base URL
    /// when one is configured.
    pub fn short_link(&self, code: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), code),
            None => code.to_string(),
        }
    }

    /// Lists every stored link except special codes, sorted by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be enumerated.
    pub async fn list(&self) -> Result<Vec<Link>, AppError> {
        let links = self
            .repository
            .list_all()
            .await
            .map_err(|e| AppError::internal(format!("failed to list links: {}", e)))?;

        Ok(links
            .into_iter()
            .filter(|link| !SpecialCode::is_special(&link.code))
            .collect())
    }
}
