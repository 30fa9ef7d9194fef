//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{account::Account, user::User};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user with its password hash
    ///
    /// Must fail with `EmailTaken`/`UserNameTaken` when the store's unique
    /// constraint rejects the row, even if a pre-check passed.
    async fn create(&self, user: &User, password: &UserPassword) -> AuthResult<()>;

    /// Find user by ID (no credentials)
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email (no credentials)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find user by canonical user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Find user and password hash by email (login only)
    async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;
}
