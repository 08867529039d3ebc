use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is not an error: `verify` returns `Ok(false)` for it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored credential is malformed: {0}")]
    InvalidCredentialFormat(String),
}
