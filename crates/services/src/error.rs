//! Shared error types for the services crate.

use thiserror::Error;

use study_core::model::{AppSettingsError, InputError};
use study_storage::sqlite::SqliteInitError;

/// Errors emitted by text-generation backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("AI service not configured")]
    Disabled,
    #[error("AI service returned an empty response")]
    EmptyResponse,
    #[error("AI request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("AI backend error: {0}")]
    Backend(String),
}

/// Errors emitted by `StudyActions` command handlers.
///
/// The store is never modified when a handler returns an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyActionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Errors emitted while bootstrapping study services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Settings(#[from] AppSettingsError),
}
