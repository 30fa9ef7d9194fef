//! Session Resolution
//!
//! Turns the cookie value into the user id it was issued for.

use chrono::Utc;
use platform::token::SessionTokenSigner;

use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Verify a session token taken from the cookie
///
/// `None` (no cookie) is `TokenMissing`; any verification failure is
/// `TokenInvalid`.
pub fn resolve_session(signer: &SessionTokenSigner, token: Option<&str>) -> AuthResult<UserId> {
    let token = token.ok_or(AuthError::TokenMissing)?;

    let claims = signer
        .verify(token, Utc::now().timestamp())
        .map_err(|e| {
            tracing::debug!(reason = %e, "Session token rejected");
            AuthError::TokenInvalid
        })?;

    Ok(UserId::from_uuid(claims.sub))
}

/// Issue a fresh session token for `user_id`
pub fn issue_session(signer: &SessionTokenSigner, user_id: &UserId) -> AuthResult<String> {
    signer
        .issue(*user_id.as_uuid(), Utc::now().timestamp())
        .map_err(|e| AuthError::Internal(e.to_string()))
}
