use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token claims.
///
/// Carries exactly the subject and the absolute expiry. Nothing else is
/// encoded into issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (opaque account identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds, UTC)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject expiring at a given instant.
    pub fn new(subject: impl ToString, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
        }
    }
}
