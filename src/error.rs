//! Error types for the country picker

use thiserror::Error;

/// Failure of a single fetch against the country endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Timeout, refused connection, DNS failure or a non-2xx status.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response format")]
    InvalidJson,

    /// Valid JSON, but not an array of records carrying a country name.
    #[error("Unexpected data format in API response")]
    UnexpectedFormat,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Everything the picker can show in place of a selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No countries loaded")]
    EmptyResult,

    #[error("Initial country '{0}' not found")]
    SelectionNotFound(String),

    #[error("Background loader stopped unexpectedly")]
    WorkerStopped,
}
