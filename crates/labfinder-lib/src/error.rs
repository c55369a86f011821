use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the lab finder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when the dataset file is not a JSON array of lab records.
    #[error("failed to parse lab dataset: {message}")]
    DatasetParse { message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the lab dataset")]
    ProjectDirsUnavailable,

    /// Raised when a contact or report submission is missing or has malformed fields.
    #[error("invalid submission: {message}")]
    InvalidSubmission { message: String },

    /// Raised when the mail provider rejects or fails to accept a message.
    #[error("mail delivery failed: {message}")]
    MailDelivery { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn invalid_submission(message: impl Into<String>) -> Self {
        Self::InvalidSubmission {
            message: message.into(),
        }
    }
}
