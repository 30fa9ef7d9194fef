//! Session check for book mutations

use chrono::Utc;
use kernel::id::UserId;

use crate::application::config::BookConfig;
use crate::error::{BookError, BookResult};

/// Resolve the acting user from the session cookie value
pub fn authenticate(config: &BookConfig, token: Option<&str>) -> BookResult<UserId> {
    let token = token.ok_or(BookError::AuthRequired)?;

    config
        .signer
        .verify(token, Utc::now().timestamp())
        .map(|claims| UserId::from_uuid(claims.sub))
        .map_err(|e| {
            tracing::debug!(reason = %e, "Session token rejected");
            BookError::AuthInvalid
        })
}
