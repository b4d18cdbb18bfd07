// In-memory token auth provider implementation
use crate::application::auth_provider::{AuthError, AuthProvider};
use crate::domain::identity::{AccessToken, Credentials, Identity, UserId};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct UserRecord {
    id: UserId,
    username: String,
    password_digest: String,
}

#[derive(Debug, Default)]
struct AuthState {
    /// username -> account
    users: HashMap<String, UserRecord>,
    /// token key -> identity, for request authorization
    tokens: HashMap<String, Identity>,
    /// user -> issued token key, so repeated logins reuse one token
    issued: HashMap<UserId, String>,
}

/// Token auth provider backed by process memory. Passwords are stored as
/// SHA-256 digests; tokens are random hex keys issued once per user.
#[derive(Debug, Default)]
pub struct MemoryAuthProvider {
    state: RwLock<AuthState>,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn generate_token_key() -> String {
    hex::encode(Sha256::digest(Uuid::new_v4().as_bytes()))
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn register(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let mut state = self.state.write().await;
        if state.users.contains_key(&credentials.username) {
            return Err(AuthError::UsernameTaken);
        }

        let record = UserRecord {
            id: UserId::new(),
            username: credentials.username.clone(),
            password_digest: digest(&credentials.password),
        };
        let identity = Identity {
            id: record.id,
            username: record.username.clone(),
        };
        state.users.insert(record.username.clone(), record);
        Ok(identity)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let state = self.state.read().await;
        let record = state
            .users
            .get(&credentials.username)
            .ok_or(AuthError::InvalidCredentials)?;

        if record.password_digest != digest(&credentials.password) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Identity {
            id: record.id,
            username: record.username.clone(),
        })
    }

    async fn issue_token(&self, identity: &Identity) -> Result<AccessToken, AuthError> {
        let mut state = self.state.write().await;
        if let Some(key) = state.issued.get(&identity.id) {
            return Ok(AccessToken(key.clone()));
        }

        let key = generate_token_key();
        state.issued.insert(identity.id, key.clone());
        state.tokens.insert(key.clone(), identity.clone());
        Ok(AccessToken(key))
    }

    async fn identify(&self, token: &str) -> Result<Identity, AuthError> {
        let state = self.state.read().await;
        state
            .tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
