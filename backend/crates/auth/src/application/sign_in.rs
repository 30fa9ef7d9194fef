//! Sign In Use Case
//!
//! Authenticates by email and password and issues a session token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::issue_session;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("All fields are required".to_string()));
        }

        // A malformed email cannot belong to an account.
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .user_repo
            .find_account_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_login(input.password);
        if !account.password.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let user = account.user;
        let session_token = issue_session(&self.config.signer, &user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            user,
            session_token,
        })
    }
}
