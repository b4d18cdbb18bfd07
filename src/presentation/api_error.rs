// HTTP error mapping for API handlers
use crate::application::account_service::AccountError;
use crate::application::auth_provider::AuthError;
use crate::application::upload_service::UploadError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Transport-level error for API handlers. Application errors are mapped
/// into one of these; the body is always `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => ApiError::Unauthorized(err.to_string()),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Auth(auth) => auth.into(),
            AccountError::Repository(source) => {
                tracing::error!("Recent uploads lookup failed: {:#}", source);
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Ingest(ingest) => ApiError::BadRequest(ingest.to_string()),
            UploadError::Repository(source) => {
                tracing::error!("Upload persistence failed: {:#}", source);
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::IngestError;

    #[test]
    fn test_missing_column_maps_to_bad_request() {
        let err: ApiError = UploadError::Ingest(IngestError::MissingColumn("pressure")).into();
        assert!(matches!(
            err,
            ApiError::BadRequest(ref message) if message == "Missing required column 'pressure'"
        ));
    }

    #[test]
    fn test_invalid_token_maps_to_unauthorized() {
        let err: ApiError = AuthError::InvalidToken.into();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
