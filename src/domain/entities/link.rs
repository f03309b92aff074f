//! Link entity representing a stored code-to-target mapping.

use serde::Serialize;

/// A short code and the target it resolves to.
///
/// The file named `code` under the storage root is the sole source of truth
/// for `target`. Links are created once and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub code: String,
    pub target: String,
}

impl Link {
    /// Creates a new Link, trimming surrounding whitespace from the target.
    pub fn new(code: impl Into<String>, target: &str) -> Self {
        Self {
            code: code.into(),
            target: target.trim().to_string(),
        }
    }

    /// Creates a listing entry for a code whose target could not be read.
    pub fn unreadable(code: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self {
            code: code.into(),
            target: format!("read error: {}", reason),
        }
    }
}
