use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::Identity;
use crate::credential::ports::CredentialStore;

/// Process-local credential store keyed by identity.
///
/// Construct once and share the handle by `Arc`; contents are dropped with it.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    documents: RwLock<HashMap<Identity, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert(&self, credential: Credential) -> Result<Credential, CredentialError> {
        let mut documents = self.documents.write().await;

        if documents.contains_key(&credential.identity) {
            return Err(CredentialError::AlreadyExists(
                credential.identity.to_string(),
            ));
        }

        documents.insert(credential.identity.clone(), credential.clone());

        Ok(credential)
    }

    async fn find(&self, identity: &Identity) -> Result<Option<Credential>, CredentialError> {
        Ok(self.documents.read().await.get(identity).cloned())
    }

    async fn update(&self, credential: Credential) -> Result<Credential, CredentialError> {
        let mut documents = self.documents.write().await;

        match documents.get_mut(&credential.identity) {
            Some(existing) => {
                *existing = credential.clone();
                Ok(credential)
            }
            None => Err(CredentialError::NotFound(credential.identity.to_string())),
        }
    }

    async fn remove(&self, identity: &Identity) -> Result<(), CredentialError> {
        self.documents
            .write()
            .await
            .remove(identity)
            .map(|_| ())
            .ok_or_else(|| CredentialError::NotFound(identity.to_string()))
    }
}
