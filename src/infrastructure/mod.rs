// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_reader;
pub mod memory_repository;
pub mod token_auth;
