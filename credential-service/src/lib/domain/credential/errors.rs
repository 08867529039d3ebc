use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for Identity validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity must not be empty")]
    Empty,

    #[error("Identity too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all credential operations
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    // Domain-level errors
    #[error("Credential already exists: {0}")]
    AlreadyExists(String),

    #[error("Credential not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Stored credential is malformed: {0}")]
    MalformedCredential(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(#[from] JwtError),

    // Infrastructure errors
    #[error("Credential store error: {0}")]
    StoreError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<PasswordError> for CredentialError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::HashingFailed(msg) => CredentialError::HashingFailed(msg),
            PasswordError::InvalidCredentialFormat(msg) => {
                CredentialError::MalformedCredential(msg)
            }
        }
    }
}
