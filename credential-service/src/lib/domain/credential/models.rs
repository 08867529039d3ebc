use std::fmt;

use auth::StoredHash;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::credential::errors::IdentityError;

/// Stored credential document.
///
/// Pairs an identity with its password hash; the raw password never
/// appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub identity: Identity,
    pub password_hash: StoredHash,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(identity: Identity, password_hash: StoredHash) -> Self {
        Self {
            identity,
            password_hash,
            updated_at: Utc::now(),
        }
    }
}

/// Account identity value type
///
/// Opaque to the credential core; surrounding whitespace is trimmed, then
/// only emptiness and length are checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    const MAX_LENGTH: usize = 254;

    /// Create a new valid identity.
    ///
    /// # Errors
    /// * `Empty` - Identity is empty or whitespace
    /// * `TooLong` - Identity exceeds 254 bytes
    pub fn new(identity: impl AsRef<str>) -> Result<Self, IdentityError> {
        let identity = identity.as_ref().trim();

        if identity.is_empty() {
            return Err(IdentityError::Empty);
        }

        if identity.len() > Self::MAX_LENGTH {
            return Err(IdentityError::TooLong {
                max: Self::MAX_LENGTH,
                actual: identity.len(),
            });
        }

        Ok(Self(identity.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to store a credential for a new identity
pub struct RegisterCommand {
    pub identity: Identity,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(identity: Identity, password: impl Into<String>) -> Self {
        Self {
            identity,
            password: password.into(),
        }
    }
}

/// Command to authenticate an identity and obtain a token
pub struct LoginCommand {
    pub identity: Identity,
    pub password: String,
    pub expires_in: Option<Duration>,
}

impl LoginCommand {
    pub fn new(identity: Identity, password: impl Into<String>) -> Self {
        Self {
            identity,
            password: password.into(),
            expires_in: None,
        }
    }

    /// Request an explicit token lifetime instead of the configured default.
    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = Some(expires_in);
        self
    }
}

/// Command to replace a credential after proving the current password
pub struct ChangePasswordCommand {
    pub identity: Identity,
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordCommand {
    pub fn new(
        identity: Identity,
        current_password: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            current_password: current_password.into(),
            new_password: new_password.into(),
        }
    }
}

/// Successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub access_token: String,
}
