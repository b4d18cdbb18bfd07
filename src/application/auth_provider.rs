// Auth provider trait - external identity and token collaborator
use crate::domain::identity::{AccessToken, Credentials, Identity};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username and password required")]
    MissingCredentials,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,
}

/// Identity collaborator. The analyzer core never interprets credentials
/// or token format; it only passes them through this seam.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create a new account and return its identity.
    async fn register(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    /// Check credentials against an existing account.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    /// Issue (or re-issue) the access token for an identity.
    async fn issue_token(&self, identity: &Identity) -> Result<AccessToken, AuthError>;

    /// Resolve a presented token back to the identity it was issued to.
    async fn identify(&self, token: &str) -> Result<Identity, AuthError>;
}
