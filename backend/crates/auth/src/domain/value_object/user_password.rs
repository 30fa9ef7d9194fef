//! User Password Value Objects
//!
//! Domain wrappers around `platform::password`. Policy violations surface as
//! `AuthError::Validation` so the handler can return them verbatim.

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};

use crate::error::{AuthError, AuthResult};

/// Password as typed by the user (validated, never persisted)
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate against the signup policy
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| AuthError::Validation(policy_message(&e).to_string()))
    }

    /// Wrap a login attempt without applying the policy
    ///
    /// Policy changes must not lock out users whose stored hash predates them.
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::new_unchecked(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl std::fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

fn policy_message(err: &PasswordPolicyError) -> &'static str {
    match err {
        PasswordPolicyError::TooShort { .. } => "Password must be at least 8 characters",
        PasswordPolicyError::TooLong { .. } => "Password must be at most 128 characters",
        PasswordPolicyError::EmptyOrWhitespace => "Password cannot be blank",
        PasswordPolicyError::InvalidCharacter => "Password contains invalid characters",
    }
}

/// Argon2id hash as stored in `users.password_hash`
#[derive(Clone)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn from_phc_string(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl std::fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("UserPassword([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_errors_are_validation() {
        let err = RawPassword::new("short".to_string()).unwrap_err();
        assert!(
            matches!(err, AuthError::Validation(ref m) if m == "Password must be at least 8 characters")
        );

        let err = RawPassword::new("          ".to_string()).unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[test]
    fn test_overlong_password_is_validation() {
        let err = RawPassword::new("x".repeat(129)).unwrap_err();
        assert!(
            matches!(err, AuthError::Validation(ref m) if m == "Password must be at most 128 characters")
        );
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("correct horse battery".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.verify(&RawPassword::for_login("correct horse battery".into()), None));
        assert!(!hashed.verify(&RawPassword::for_login("wrong horse".into()), None));
    }

    #[test]
    fn test_phc_roundtrip_verifies() {
        let raw = RawPassword::new("another password".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));
    }

    #[test]
    fn test_debug_redacted() {
        let raw = RawPassword::new("super secret pw".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("super"));
    }
}
