//! Sign Up Use Case
//!
//! Creates a new user account and opens a session for it.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::issue_session;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user: User,
    pub session_token: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        if [&input.user_name, &input.email, &input.password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(AuthError::Validation("All fields are required".to_string()));
        }

        let email = Email::new(&input.email)?;
        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let raw_password = RawPassword::new(input.password)?;

        // Fast path only; the unique constraints decide in `create`.
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }
        if self.user_repo.find_by_user_name(&user_name).await?.is_some() {
            return Err(AuthError::UserNameTaken);
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(user_name, email);

        self.user_repo.create(&user, &password).await?;

        let session_token = issue_session(&self.config.signer, &user.user_id)?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput {
            user,
            session_token,
        })
    }
}
