// HTTP request handlers
use crate::domain::identity::{AccessToken, Credentials, Identity};
use crate::domain::stats::{OverallStats, PerTypeStats};
use crate::domain::upload::UploadSummary;
use crate::presentation::api_error::ApiError;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct CredentialsBody {
    pub username: String,
    pub password: String,
}

impl From<CredentialsBody> for Credentials {
    fn from(body: CredentialsBody) -> Self {
        Credentials {
            username: body.username,
            password: body.password,
        }
    }
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub token: AccessToken,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: AccessToken,
    pub last_uploads: Vec<UploadSummary>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub overall_stats: OverallStats,
    pub per_type_stats: PerTypeStats,
    pub data: UploadSummary,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Register a new user and hand back their access token
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsBody>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.account_service.register(&body.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            token: session.token,
        }),
    ))
}

/// Log in and return the token plus the last five upload summaries
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsBody>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.account_service.login(&body.into()).await?;

    Ok(Json(LoginResponse {
        token: session.token,
        last_uploads: session.recent_uploads,
    }))
}

/// Process an uploaded CSV of sensor readings and return its statistics
pub async fn upload_csv(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let identity = authorize(&state, &headers).await?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload.csv").to_string();
            let content = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {e}")))?;
            upload = Some((file_name, content.to_vec()));
            break;
        }
    }

    let Some((file_name, content)) = upload else {
        return Err(ApiError::BadRequest("No file uploaded".to_string()));
    };

    let summary = state
        .upload_service
        .process_upload(&identity, &file_name, &content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File processed successfully",
            overall_stats: summary.overall_stats(),
            per_type_stats: summary.per_type_stats.clone(),
            data: summary,
        }),
    ))
}

/// Resolve the `Authorization: Token <key>` header to an identity.
async fn authorize(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Token "))
        .map(str::trim)
        .ok_or_else(|| {
            ApiError::Unauthorized("Authentication credentials were not provided".to_string())
        })?;

    Ok(state.account_service.identify(token).await?)
}
