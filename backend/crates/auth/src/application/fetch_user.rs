//! Fetch User Use Case
//!
//! Resolves the session cookie to the current user's public profile.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::resolve_session;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct FetchUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> FetchUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<User> {
        let user_id = resolve_session(&self.config.signer, session_token)?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
