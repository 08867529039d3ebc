use super::errors::PasswordError;
use super::normalize::NormalizedPassword;
use super::stored_hash::StoredHash;
use crate::config::ConfigurationError;

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Password hashing implementation.
///
/// Wraps bcrypt behind [`NormalizedPassword`] so that inputs longer than
/// bcrypt's 72-byte ceiling are never truncated.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    /// Create a hasher with bcrypt's default work factor.
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `cost` - bcrypt cost, between 4 and 31
    ///
    /// # Errors
    /// * `InvalidPasswordCost` - Cost outside the range bcrypt accepts
    pub fn with_cost(cost: u32) -> Result<Self, ConfigurationError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(ConfigurationError::InvalidPasswordCost(cost));
        }

        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password for storage.
    ///
    /// A fresh random salt is drawn on every call, so hashing the same
    /// password twice yields two different artifacts.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// bcrypt hash in `$2b$` format
    ///
    /// # Errors
    /// * `HashingFailed` - The primitive failed (e.g. no OS randomness)
    pub fn hash(&self, password: &str) -> Result<StoredHash, PasswordError> {
        let normalized = NormalizedPassword::new(password);
        if normalized.is_digest() {
            tracing::debug!(
                password_bytes = password.len(),
                "Password exceeds bcrypt input limit, hashing its digest"
            );
        }

        bcrypt::hash(normalized.as_bytes(), self.cost)
            .map(StoredHash::from)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The salt and cost embedded in `stored_hash` are used, not the ones
    /// this hasher was configured with.
    ///
    /// # Arguments
    /// * `password` - Plaintext candidate
    /// * `stored_hash` - Previously stored bcrypt hash
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidCredentialFormat` - `stored_hash` is not a parseable bcrypt hash
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let normalized = NormalizedPassword::new(password);

        bcrypt::verify(normalized.as_bytes(), stored_hash)
            .map_err(|e| PasswordError::InvalidCredentialFormat(e.to_string()))
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}
