// Account service - Use cases for registration and login
use crate::application::auth_provider::{AuthError, AuthProvider};
use crate::application::upload_repository::UploadRepository;
use crate::domain::identity::{AccessToken, Credentials, Identity};
use crate::domain::upload::{UploadSummary, RECENT_WINDOW};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Failed to load recent uploads")]
    Repository(#[source] anyhow::Error),
}

/// An authenticated session: who the user is, the token to present on
/// later requests, and their recent-uploads window.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: Identity,
    pub token: AccessToken,
    pub recent_uploads: Vec<UploadSummary>,
}

#[derive(Clone)]
pub struct AccountService {
    auth: Arc<dyn AuthProvider>,
    repository: Arc<dyn UploadRepository>,
}

impl AccountService {
    pub fn new(auth: Arc<dyn AuthProvider>, repository: Arc<dyn UploadRepository>) -> Self {
        Self { auth, repository }
    }

    /// Create an account and hand back a ready-to-use session. A fresh
    /// account has no upload history.
    pub async fn register(&self, credentials: &Credentials) -> Result<Session, AccountError> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let identity = self.auth.register(credentials).await?;
        let token = self.auth.issue_token(&identity).await?;
        tracing::info!("Registered user {}", identity.username);

        Ok(Session {
            identity,
            token,
            recent_uploads: Vec::new(),
        })
    }

    /// Authenticate and return a session carrying the recent-uploads
    /// window for the client to render.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AccountError> {
        let identity = self.auth.authenticate(credentials).await?;
        let token = self.auth.issue_token(&identity).await?;
        let recent_uploads = self
            .repository
            .recent(&identity.id, RECENT_WINDOW)
            .await
            .map_err(AccountError::Repository)?;

        Ok(Session {
            identity,
            token,
            recent_uploads,
        })
    }

    /// Resolve the token presented on a request back to its identity.
    pub async fn identify(&self, token: &str) -> Result<Identity, AuthError> {
        self.auth.identify(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_repository::MemoryUploadRepository;
    use crate::infrastructure::token_auth::MemoryAuthProvider;

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(MemoryAuthProvider::new()),
            Arc::new(MemoryUploadRepository::new()),
        )
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service();
        let creds = credentials("operator", "hunter2");

        let registered = service.register(&creds).await.unwrap();
        assert!(registered.recent_uploads.is_empty());

        let session = service.login(&creds).await.unwrap();
        assert_eq!(session.identity.username, "operator");
        assert!(session.recent_uploads.is_empty());

        let identity = service.identify(session.token.as_str()).await.unwrap();
        assert_eq!(identity.id, session.identity.id);
    }

    #[tokio::test]
    async fn test_register_rejects_blank_credentials() {
        let service = service();
        let err = service
            .register(&credentials("  ", "secret"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountError::Auth(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let service = service();
        service
            .register(&credentials("operator", "hunter2"))
            .await
            .unwrap();

        let err = service
            .login(&credentials("operator", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountError::Auth(AuthError::InvalidCredentials)
        ));
    }
}
