//! Book Error Types
//!
//! Book workflow errors, rendered through `kernel::error::AppError`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use media::MediaError;
use thiserror::Error;

pub type BookResult<T> = Result<T, BookError>;

#[derive(Debug, Error)]
pub enum BookError {
    /// Missing or blank required field
    #[error("{0}")]
    Validation(String),

    #[error("Invalid book id")]
    InvalidBookId,

    /// No session cookie
    #[error("No token provided")]
    AuthRequired,

    /// Session token rejected, or its user no longer exists
    #[error("Invalid token")]
    AuthInvalid,

    #[error("Book not found")]
    NotFound,

    /// Ownership enforcement is on and the caller is not the owner
    #[error("You do not own this book")]
    NotOwner,

    /// Upload to the media host failed
    #[error("Media upload failed: {0}")]
    Media(#[from] MediaError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookError::AuthRequired | BookError::AuthInvalid => StatusCode::UNAUTHORIZED,
            BookError::NotOwner => StatusCode::FORBIDDEN,
            BookError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BookError::AuthRequired | BookError::AuthInvalid => ErrorKind::Unauthorized,
            BookError::NotOwner => ErrorKind::Forbidden,
            BookError::NotFound => ErrorKind::NotFound,
            BookError::Media(e) => e.kind(),
            _ => ErrorKind::BadRequest,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            BookError::Database(_) => AppError::new(self.kind(), "Database error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            BookError::Database(e) => {
                tracing::error!(error = %e, "Book database error");
            }
            BookError::Media(e) if !e.is_client_error() => {
                tracing::error!(error = %e, "Media host failure");
            }
            BookError::AuthInvalid | BookError::NotOwner => {
                tracing::warn!(error = %self, "Book request rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Book error");
            }
        }
    }
}

impl From<JsonRejection> for BookError {
    fn from(rejection: JsonRejection) -> Self {
        BookError::Validation(AppError::from(rejection).message().to_string())
    }
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
