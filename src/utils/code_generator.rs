//! Short code generation and validation utilities.
//!
//! Codes double as file names, so anything that could escape the storage
//! directory is rejected before it gets near a path.

use base64::Engine as _;

/// Random bytes drawn per generated code; 3 bytes encode to 4 characters.
const CODE_LENGTH_BYTES: usize = 3;

/// Reasons a code cannot be used as a file name.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("code is empty")]
    Empty,

    #[error("code is a relative path component")]
    RelativeComponent,

    #[error("code contains a forbidden character {0:?}")]
    ForbiddenChar(char),
}

/// Generates a cryptographically secure random short code.
///
/// Draws 3 bytes from the OS entropy source and encodes them as URL-safe
/// base64 without padding, producing a 4-character code (about 16.7M
/// possibilities). Uniqueness is not checked here; the store's exclusive
/// create is the only collision guard.
///
/// # Errors
///
/// Returns [`getrandom::Error`] if the system random number generator fails.
pub fn generate_code() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Validates that `code` is safe to use as a single file name.
///
/// # Rules
///
/// - Not empty
/// - Not `.` or `..`
/// - No `/`, `\` or NUL characters
///
/// Special codes such as `.root` pass; reserving them is the caller's job.
///
/// # Errors
///
/// Returns the first [`CodeError`] rule the code violates.
pub fn validate_code(code: &str) -> Result<(), CodeError> {
    if code.is_empty() {
        return Err(CodeError::Empty);
    }

    if code == "." || code == ".." {
        return Err(CodeError::RelativeComponent);
    }

    if let Some(c) = code.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
        return Err(CodeError::ForbiddenChar(c));
    }

    Ok(())
}
