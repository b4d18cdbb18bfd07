// Ingestion error taxonomy
use thiserror::Error;

/// Errors produced by the CSV ingestion pipeline. All of these are
/// user-facing and non-retryable: the same input yields the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    /// Every row was dropped during numeric coercion, so there is nothing
    /// to average over.
    #[error("No rows with valid numeric readings")]
    EmptyResult,

    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),
}
