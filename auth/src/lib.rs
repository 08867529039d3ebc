//! Credential issuance and verification
//!
//! Provides the authentication core used by backend services:
//! - Password hashing (bcrypt, with SHA-256 pre-hashing past bcrypt's 72-byte limit)
//! - Signed bearer token issuance carrying `sub` and `exp`
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::CredentialHasher;
//!
//! let hasher = CredentialHasher::with_cost(4).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", hash.as_str()).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//! use jsonwebtoken::Algorithm;
//!
//! let issuer = TokenIssuer::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Algorithm::HS256,
//!     Duration::minutes(60),
//! )
//! .unwrap();
//! let token = issuer.issue("user123", None).unwrap();
//! let claims = issuer.decode(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthConfig, Authenticator};
//!
//! let mut config = AuthConfig::new("secret_key_at_least_32_bytes_long!");
//! config.password_cost = 4;
//! let auth = Authenticator::from_config(&config).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth
//!     .authenticate("password123", hash.as_str(), "user123", None)
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod config;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use config::ConfigurationError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use password::CredentialHasher;
pub use password::PasswordError;
pub use password::StoredHash;
