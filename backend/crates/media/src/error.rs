//! Media Error Types

use kernel::error::kind::ErrorKind;
use thiserror::Error;

pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    /// Nothing to upload
    #[error("Empty media payload")]
    EmptyPayload,

    /// Transport failure (connect, timeout, TLS)
    #[error("Media host request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The media host answered with an error status
    #[error("Media host returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Unexpected media host response: {0}")]
    InvalidResponse(String),
}

impl MediaError {
    pub fn kind(&self) -> ErrorKind {
        // Upstream failures reach clients as 400 like every other failure.
        ErrorKind::BadRequest
    }

    /// Whether the failure came from the payload rather than the host
    pub fn is_client_error(&self) -> bool {
        matches!(self, MediaError::EmptyPayload)
    }
}
