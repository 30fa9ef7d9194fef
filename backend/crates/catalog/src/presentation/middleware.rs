//! Book Middleware
//!
//! Session check for the mutating book routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;

use crate::application::config::BookConfig;
use crate::application::session::authenticate;
use crate::error::BookError;

/// Acting user, inserted into request extensions by [`require_session`]
#[derive(Debug, Clone, Copy)]
pub struct SessionUser(pub UserId);

/// Middleware that requires a valid session cookie
pub async fn require_session(
    State(config): State<Arc<BookConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, BookError> {
    let token = platform::cookie::extract_cookie(req.headers(), &config.session_cookie_name);
    let user_id = authenticate(&config, token.as_deref())?;

    req.extensions_mut().insert(SessionUser(user_id));

    Ok(next.run(req).await)
}
