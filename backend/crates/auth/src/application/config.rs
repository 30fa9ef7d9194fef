//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::token::SessionTokenSigner;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Session lifetime (cookie Max-Age and token expiry)
pub const SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Issues and verifies the session token; shared with the catalog
    pub signer: SessionTokenSigner,
    /// Whether to set the Secure cookie attribute (production only)
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "token".to_string(),
            signer: SessionTokenSigner::new([0u8; 32].to_vec(), SESSION_TTL),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            signer: SessionTokenSigner::new(platform::crypto::random_bytes(32), SESSION_TTL),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie attributes for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age_secs: Some(self.signer.ttl().as_secs()),
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
