use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::StoredHash;

use crate::credential::errors::CredentialError;
use crate::credential::models::ChangePasswordCommand;
use crate::credential::models::Credential;
use crate::credential::models::Identity;
use crate::credential::models::LoginCommand;
use crate::credential::models::LoginOutcome;
use crate::credential::models::RegisterCommand;
use crate::credential::ports::CredentialServicePort;
use crate::credential::ports::CredentialStore;

/// Domain service implementation for credential operations.
///
/// bcrypt work runs on tokio's blocking pool so slow hashes never stall the
/// async workers. Token issuance is cheap and runs inline.
pub struct CredentialService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> CredentialService<CS>
where
    CS: CredentialStore,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential document store
    /// * `authenticator` - Hashing and token core, built once at startup
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<StoredHash, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);
        let hash = offload(move || authenticator.hash_password(&password)).await??;
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: String,
        credential: &Credential,
    ) -> Result<bool, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = credential.password_hash.clone();

        let result =
            offload(move || authenticator.verify_password(&password, stored_hash.as_str()))
                .await?
                .map_err(CredentialError::from);

        if let Err(CredentialError::MalformedCredential(reason)) = &result {
            tracing::error!(
                identity = %credential.identity,
                reason = %reason,
                "Stored credential is malformed"
            );
        }

        result
    }

    /// Load a credential and check the password, folding an unknown
    /// identity and a wrong password into the same error.
    async fn authenticate(
        &self,
        identity: &Identity,
        password: String,
    ) -> Result<Credential, CredentialError> {
        let Some(credential) = self.store.find(identity).await? else {
            tracing::warn!(identity = %identity, "Authentication failed: unknown identity");
            return Err(CredentialError::InvalidCredentials);
        };

        if !self.verify_password(password, &credential).await? {
            tracing::warn!(identity = %identity, "Authentication failed: password mismatch");
            return Err(CredentialError::InvalidCredentials);
        }

        Ok(credential)
    }
}

async fn offload<T, F>(task: F) -> Result<T, CredentialError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| CredentialError::Unknown(format!("Credential worker failed: {}", e)))
}

#[async_trait]
impl<CS> CredentialServicePort for CredentialService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Credential, CredentialError> {
        if self.store.find(&command.identity).await?.is_some() {
            return Err(CredentialError::AlreadyExists(command.identity.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;
        let credential = self
            .store
            .insert(Credential::new(command.identity, password_hash))
            .await?;

        tracing::info!(identity = %credential.identity, "Credential registered");

        Ok(credential)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, CredentialError> {
        let credential = self
            .authenticate(&command.identity, command.password)
            .await?;

        let access_token = self
            .authenticator
            .issue_token(credential.identity.as_str(), command.expires_in)?;

        tracing::info!(identity = %credential.identity, "Login succeeded");

        Ok(LoginOutcome {
            identity: credential.identity,
            access_token,
        })
    }

    async fn change_password(
        &self,
        command: ChangePasswordCommand,
    ) -> Result<Credential, CredentialError> {
        let credential = self
            .authenticate(&command.identity, command.current_password)
            .await?;

        let password_hash = self.hash_password(command.new_password).await?;
        let updated = self
            .store
            .update(Credential::new(credential.identity, password_hash))
            .await?;

        tracing::info!(identity = %updated.identity, "Password changed");

        Ok(updated)
    }

    async fn remove(&self, identity: &Identity) -> Result<(), CredentialError> {
        self.store.remove(identity).await?;

        tracing::info!(identity = %identity, "Credential removed");

        Ok(())
    }
}
