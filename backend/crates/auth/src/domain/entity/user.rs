//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};

/// A registered user (public profile, no credentials)
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id
    pub fn new(user_name: UserName, email: Email) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            created_at: now,
            updated_at: now,
        }
    }
}
