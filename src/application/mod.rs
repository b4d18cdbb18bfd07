// Application layer - Use cases and collaborator traits
pub mod account_service;
pub mod auth_provider;
pub mod upload_repository;
pub mod upload_service;
