//! Stateless Session Tokens
//!
//! HS256 JWTs carrying `sub`, `iat` and `exp`. Nothing is stored
//! server-side: a token stays valid until `exp`, even after the client
//! drops the cookie.

use std::time::Duration;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims embedded in a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: Uuid,
    /// Issued at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
}

impl TokenClaims {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        now_secs >= self.exp
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token signature mismatch")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::InvalidSignature => TokenError::BadSignature,
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

/// Issues and verifies HS256 session tokens
#[derive(Clone)]
pub struct SessionTokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionTokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        let secret = secret.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Expiry is checked against the caller's clock in `verify`.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from `now_secs` for the configured TTL
    pub fn issue(&self, subject: Uuid, now_secs: i64) -> Result<String, TokenError> {
        let claims = TokenClaims {
            sub: subject,
            iat: now_secs,
            exp: now_secs + self.ttl.as_secs() as i64,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str, now_secs: i64) -> Result<TokenClaims, TokenError> {
        let data =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.is_expired_at(now_secs) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for SessionTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenSigner")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEK: Duration = Duration::from_secs(7 * 24 * 3600);

    fn signer() -> SessionTokenSigner {
        SessionTokenSigner::new(vec![7u8; 32], WEEK)
    }

    #[test]
    fn test_issue_and_verify() {
        let user = Uuid::new_v4();
        let token = signer().issue(user, 1_000).unwrap();

        let claims = signer().verify(&token, 1_001).unwrap();
        assert_eq!(claims.sub, user);
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp, 1_000 + WEEK.as_secs() as i64);
    }

    #[test]
    fn test_token_is_a_three_part_jwt() {
        let token = signer().issue(Uuid::new_v4(), 0).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_expired_token() {
        let token = signer().issue(Uuid::new_v4(), 0).unwrap();
        let exp = WEEK.as_secs() as i64;

        assert!(signer().verify(&token, exp - 1).is_ok());
        assert_eq!(signer().verify(&token, exp), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_payload() {
        let token = signer().issue(Uuid::new_v4(), 0).unwrap();
        let forged_claims = TokenClaims {
            sub: Uuid::new_v4(),
            iat: 0,
            exp: i64::MAX,
        };
        let forged_token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &forged_claims,
            &EncodingKey::from_secret(&[9u8; 32]),
        )
        .unwrap();

        // Original signature over a forged payload
        let mut parts: Vec<&str> = forged_token.split('.').collect();
        let original_sig = token.rsplit('.').next().unwrap();
        parts[2] = original_sig;
        let spliced = parts.join(".");

        assert_eq!(signer().verify(&spliced, 1), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_wrong_secret() {
        let token = signer().issue(Uuid::new_v4(), 0).unwrap();
        let other = SessionTokenSigner::new(vec![8u8; 32], WEEK);
        assert_eq!(other.verify(&token, 1), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(signer().verify("garbage", 0), Err(TokenError::Malformed));
        assert_eq!(signer().verify("a.b.c", 0), Err(TokenError::Malformed));
        assert_eq!(signer().verify("", 0), Err(TokenError::Malformed));
    }
}
