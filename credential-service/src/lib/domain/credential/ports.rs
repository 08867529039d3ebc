use async_trait::async_trait;

use crate::credential::errors::CredentialError;
use crate::credential::models::ChangePasswordCommand;
use crate::credential::models::Credential;
use crate::credential::models::Identity;
use crate::credential::models::LoginCommand;
use crate::credential::models::LoginOutcome;
use crate::credential::models::RegisterCommand;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Hash and store a password for a new identity.
    ///
    /// # Arguments
    /// * `command` - Identity and plaintext password
    ///
    /// # Returns
    /// Stored credential
    ///
    /// # Errors
    /// * `AlreadyExists` - Identity already has a credential
    /// * `HashingFailed` - Password hashing failed
    /// * `StoreError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Credential, CredentialError>;

    /// Verify a password and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Identity, plaintext password and optional token lifetime
    ///
    /// # Returns
    /// Identity and signed token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identity or wrong password
    /// * `MalformedCredential` - Stored hash cannot be parsed
    /// * `TokenIssuance` - Token signing failed
    /// * `StoreError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, CredentialError>;

    /// Replace a password after verifying the current one.
    ///
    /// # Arguments
    /// * `command` - Identity, current and new plaintext passwords
    ///
    /// # Returns
    /// Updated credential
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identity or wrong current password
    /// * `MalformedCredential` - Stored hash cannot be parsed
    /// * `HashingFailed` - Password hashing failed
    /// * `StoreError` - Store operation failed
    async fn change_password(
        &self,
        command: ChangePasswordCommand,
    ) -> Result<Credential, CredentialError>;

    /// Delete the credential of an identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity has no credential
    /// * `StoreError` - Store operation failed
    async fn remove(&self, identity: &Identity) -> Result<(), CredentialError>;
}

/// Document store holding one credential per identity.
///
/// Implementations only ever receive stored hashes, never raw passwords.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a credential for an identity that has none.
    ///
    /// # Errors
    /// * `AlreadyExists` - Identity already has a credential
    /// * `StoreError` - Store operation failed
    async fn insert(&self, credential: Credential) -> Result<Credential, CredentialError>;

    /// Retrieve the credential of an identity.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `StoreError` - Store operation failed
    async fn find(&self, identity: &Identity) -> Result<Option<Credential>, CredentialError>;

    /// Overwrite the credential of an existing identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity has no credential
    /// * `StoreError` - Store operation failed
    async fn update(&self, credential: Credential) -> Result<Credential, CredentialError>;

    /// Remove the credential of an identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity has no credential
    /// * `StoreError` - Store operation failed
    async fn remove(&self, identity: &Identity) -> Result<(), CredentialError>;
}
