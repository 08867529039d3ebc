use chrono::Duration;

use crate::config::AuthConfig;
use crate::config::ConfigurationError;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::password::CredentialHasher;
use crate::password::PasswordError;
use crate::password::StoredHash;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds no mutable state; share it across threads behind an `Arc`.
pub struct Authenticator {
    credential_hasher: CredentialHasher,
    token_issuer: TokenIssuer,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    pub fn new(credential_hasher: CredentialHasher, token_issuer: TokenIssuer) -> Self {
        Self {
            credential_hasher,
            token_issuer,
        }
    }

    /// Build an authenticator from configuration.
    ///
    /// The whole configuration is validated once, by the token issuer, before
    /// the hasher is built.
    ///
    /// Call once at startup; an error here means the process must not serve
    /// traffic.
    ///
    /// # Errors
    /// * `ConfigurationError` - Any setting is missing or invalid
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigurationError> {
        let token_issuer = TokenIssuer::from_config(config)?;
        let credential_hasher = CredentialHasher::with_cost(config.password_cost)?;

        tracing::debug!(
            algorithm = ?token_issuer.algorithm(),
            default_lifetime_minutes = config.default_token_lifetime_minutes,
            password_cost = credential_hasher.cost(),
            "Authenticator configured"
        );

        Ok(Self::new(credential_hasher, token_issuer))
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<StoredHash, PasswordError> {
        self.credential_hasher.hash(password)
    }

    /// Check a password against a stored hash without issuing anything.
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, PasswordError> {
        self.credential_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identifier carried in the token's `sub` claim
    /// * `expires_in` - Optional token lifetime, default used otherwise
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        expires_in: Option<Duration>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.credential_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(subject, expires_in)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification, for callers that have
    /// authenticated the subject some other way.
    pub fn issue_token(
        &self,
        subject: &str,
        expires_in: Option<Duration>,
    ) -> Result<String, JwtError> {
        self.token_issuer.issue(subject, expires_in)
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.token_issuer.decode(token)
    }
}
