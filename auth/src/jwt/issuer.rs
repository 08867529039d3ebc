use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use crate::config::AuthConfig;
use crate::config::ConfigurationError;

/// Mints signed bearer tokens for authenticated subjects.
///
/// Keys, algorithm and default lifetime are fixed at construction; every
/// misconfiguration is reported there rather than on `issue`.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_lifetime: Duration,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret
    /// * `algorithm` - One of HS256, HS384, HS512
    /// * `default_lifetime` - Lifetime used when callers give none
    ///
    /// # Errors
    /// * `MissingSigningSecret` - Secret is empty
    /// * `UnsupportedAlgorithm` - Algorithm is not HMAC-based
    /// * `InvalidTokenLifetime` - Default lifetime is zero, negative or would
    ///   overflow the expiry timestamp
    pub fn new(
        secret: &[u8],
        algorithm: Algorithm,
        default_lifetime: Duration,
    ) -> Result<Self, ConfigurationError> {
        if secret.is_empty() {
            return Err(ConfigurationError::MissingSigningSecret);
        }

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(ConfigurationError::UnsupportedAlgorithm(format!(
                "{:?}",
                algorithm
            )));
        }

        if default_lifetime <= Duration::zero()
            || Utc::now().checked_add_signed(default_lifetime).is_none()
        {
            return Err(ConfigurationError::InvalidTokenLifetime(
                default_lifetime.num_minutes(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            default_lifetime,
        })
    }

    /// Create a token issuer from configuration, validating it first.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        Self::new(
            config.signing_secret.as_bytes(),
            config.algorithm()?,
            config.default_token_lifetime()?,
        )
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn default_lifetime(&self) -> Duration {
        self.default_lifetime
    }

    /// Issue a token for a subject.
    ///
    /// Expiry is `now (UTC) + expires_in`. A missing, zero or negative
    /// `expires_in` falls back to the default lifetime.
    ///
    /// # Arguments
    /// * `subject` - Opaque subject identifier, not looked up
    /// * `expires_in` - Optional explicit lifetime
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry overflowed or signing failed
    pub fn issue(&self, subject: &str, expires_in: Option<Duration>) -> Result<String, JwtError> {
        let lifetime = expires_in
            .filter(|lifetime| *lifetime > Duration::zero())
            .unwrap_or(self.default_lifetime);

        let expires_at = Utc::now()
            .checked_add_signed(lifetime)
            .ok_or_else(|| JwtError::EncodingFailed("Token expiry out of range".to_string()))?;

        let claims = Claims::new(subject, expires_at);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token issued by this issuer.
    ///
    /// Signature and `exp` are both checked; `jsonwebtoken`'s default leeway
    /// absorbs small clock skew.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `DecodingFailed` - Token is malformed or its signature is invalid
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(self.algorithm);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::DecodingFailed(e.to_string()),
            })
    }
}
