mod conversions;

use thiserror::Error;
use uuid::Uuid;

/// Everything a transform can report back to the page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Please enter some text to transform.")]
    MissingInput,

    #[error("Please enter your OpenAI API key in the sidebar.")]
    MissingCredential,

    #[error("Error: {0}")]
    ExternalServiceFailure(String),
}

impl TransformError {
    /// Missing input is a nudge, not a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, TransformError::MissingInput)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Loading error: {0}")]
    Loading(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(Uuid),

    #[error("A transformation is already in progress.")]
    Busy,

    #[error("There is no transformed text to download yet.")]
    NothingToDownload,
}
