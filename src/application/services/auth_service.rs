//! Shared-secret gate for listing and creation.

use crate::error::AppError;

/// Compares supplied `auth` values against the configured secret.
///
/// The secret is a plain bearer value, so an ordinary equality check is
/// enough here.
#[derive(Debug, Clone, Default)]
pub struct AuthService {
    secret: Option<String>,
}

impl AuthService {
    /// Creates the gate. An empty secret counts as no secret.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// Returns true if a secret is configured, i.e. gated operations exist at all.
    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Accepts the request if any supplied value equals the secret.
    ///
    /// `supplied` holds the `auth` query parameter and the `auth` header, in
    /// that order, whichever are present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if no secret is configured.
    /// Returns [`AppError::Unauthorized`] if no supplied value matches.
    pub fn authorize(&self, supplied: &[&str]) -> Result<(), AppError> {
        let Some(secret) = self.secret.as_deref() else {
            return Err(AppError::forbidden("listing disabled"));
        };

        if supplied.iter().any(|candidate| *candidate == secret) {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
