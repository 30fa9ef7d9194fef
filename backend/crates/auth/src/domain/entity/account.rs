//! Account Entity
//!
//! A user together with its stored password hash. Only the login path loads
//! this; everything else works with [`User`].

use crate::domain::entity::user::User;
use crate::domain::value_object::user_password::UserPassword;

#[derive(Debug, Clone)]
pub struct Account {
    pub user: User,
    pub password: UserPassword,
}
