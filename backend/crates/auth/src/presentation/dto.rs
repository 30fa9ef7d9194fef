//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;

// ============================================================================
// Requests
// ============================================================================

/// Sign up request
///
/// Fields default to empty so a missing field reads as "All fields are
/// required" instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Public user profile (never carries the password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            username: user.user_name.original().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// `{user, message}` envelope for signup, login and fetch-user
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
    pub message: &'static str,
}

/// Message-only response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, user_name::UserName};

    #[test]
    fn test_user_response_shape() {
        let user = User::new(
            UserName::new("reader").unwrap(),
            Email::new("reader@example.com").unwrap(),
        );
        let json = serde_json::to_value(UserEnvelope {
            user: UserResponse::from(&user),
            message: "User fetched successfully",
        })
        .unwrap();

        assert_eq!(json["message"], "User fetched successfully");
        assert_eq!(json["user"]["username"], "reader");
        assert_eq!(json["user"]["email"], "reader@example.com");
        assert!(json["user"]["createdAt"].is_string());
        assert!(json["user"]["updatedAt"].is_string());
        assert!(json["user"].get("password").is_none());
        assert!(json["user"].get("passwordHash").is_none());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: SignUpRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert_eq!(req.username, "");
        assert_eq!(req.password, "");
    }
}
