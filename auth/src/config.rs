use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::Algorithm;
use serde::Deserialize;
use thiserror::Error;

use crate::password::hasher::MAX_COST;
use crate::password::hasher::MIN_COST;

pub const DEFAULT_SIGNING_ALGORITHM: &str = "HS256";
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 60;

/// Startup-time configuration failures. Any of these must stop the process
/// before it serves traffic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Signing secret is missing or empty")]
    MissingSigningSecret,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Default token lifetime must be positive and representable, got {0} minutes")]
    InvalidTokenLifetime(i64),

    #[error("Password cost must be between 4 and 31, got {0}")]
    InvalidPasswordCost(u32),
}

/// Credential and token settings.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub signing_secret: String,

    #[serde(default = "default_signing_algorithm")]
    pub signing_algorithm: String,

    #[serde(default = "default_token_lifetime_minutes")]
    pub default_token_lifetime_minutes: i64,

    #[serde(default = "default_password_cost")]
    pub password_cost: u32,
}

fn default_signing_algorithm() -> String {
    DEFAULT_SIGNING_ALGORITHM.to_string()
}

fn default_token_lifetime_minutes() -> i64 {
    DEFAULT_TOKEN_LIFETIME_MINUTES
}

fn default_password_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl AuthConfig {
    /// Build a configuration with defaults for everything but the secret.
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            signing_algorithm: default_signing_algorithm(),
            default_token_lifetime_minutes: default_token_lifetime_minutes(),
            password_cost: default_password_cost(),
        }
    }

    /// Check every setting.
    ///
    /// # Errors
    /// * `MissingSigningSecret` - Secret is empty or whitespace
    /// * `UnsupportedAlgorithm` - Algorithm is unknown or not HMAC-based
    /// * `InvalidTokenLifetime` - Default lifetime is zero, negative or too
    ///   large to add to the current time
    /// * `InvalidPasswordCost` - Cost outside bcrypt's range
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.signing_secret.trim().is_empty() {
            return Err(ConfigurationError::MissingSigningSecret);
        }

        self.algorithm()?;
        self.default_token_lifetime()?;

        if !(MIN_COST..=MAX_COST).contains(&self.password_cost) {
            return Err(ConfigurationError::InvalidPasswordCost(self.password_cost));
        }

        Ok(())
    }

    /// Parse the configured signing algorithm.
    ///
    /// Only the HMAC family is accepted since tokens are signed with a
    /// shared secret.
    pub fn algorithm(&self) -> Result<Algorithm, ConfigurationError> {
        let algorithm = Algorithm::from_str(self.signing_algorithm.trim()).map_err(|_| {
            ConfigurationError::UnsupportedAlgorithm(self.signing_algorithm.clone())
        })?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
            _ => Err(ConfigurationError::UnsupportedAlgorithm(
                self.signing_algorithm.clone(),
            )),
        }
    }

    /// Convert the configured lifetime, rejecting values that are not
    /// positive or whose expiry would not fit in a timestamp.
    pub fn default_token_lifetime(&self) -> Result<Duration, ConfigurationError> {
        let minutes = self.default_token_lifetime_minutes;

        Duration::try_minutes(minutes)
            .filter(|lifetime| *lifetime > Duration::zero())
            .filter(|lifetime| Utc::now().checked_add_signed(*lifetime).is_some())
            .ok_or(ConfigurationError::InvalidTokenLifetime(minutes))
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"<redacted>")
            .field("signing_algorithm", &self.signing_algorithm)
            .field(
                "default_token_lifetime_minutes",
                &self.default_token_lifetime_minutes,
            )
            .field("password_cost", &self.password_cost)
            .finish()
    }
}
