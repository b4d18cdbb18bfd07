// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::account_service::AccountService;
use crate::application::upload_service::UploadService;
use crate::infrastructure::config::load_server_config;
use crate::infrastructure::memory_repository::MemoryUploadRepository;
use crate::infrastructure::token_auth::MemoryAuthProvider;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, login, register, upload_csv};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let server_config = load_server_config()?;

    // Create collaborators (infrastructure layer)
    let repository = Arc::new(MemoryUploadRepository::new());
    let auth_provider = Arc::new(MemoryAuthProvider::new());

    // Create services (application layer)
    let account_service = AccountService::new(auth_provider, repository.clone());
    let upload_service = UploadService::new(repository);

    // Create application state
    let state = Arc::new(AppState {
        account_service,
        upload_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/upload_csv", post(upload_csv))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!(
        "{}:{}",
        server_config.server.host, server_config.server.port
    )
    .parse()
    .context("Invalid server address in configuration")?;
    tracing::info!("Starting equipment-analyzer service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
