//! Application Configuration
//!
//! Configuration for the book workflow.

use platform::token::SessionTokenSigner;

/// Book workflow configuration
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Session cookie name (same cookie the auth routes set)
    pub session_cookie_name: String,
    /// Verifies session tokens; must share the auth signer's secret
    pub signer: SessionTokenSigner,
    /// Reject update/delete from anyone but the book's owner
    pub enforce_ownership: bool,
    /// Delete already-uploaded assets when a later step of addBook fails
    pub compensate_failed_uploads: bool,
    /// Media root folder, used to derive handles for legacy rows
    pub media_root_folder: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "token".to_string(),
            signer: SessionTokenSigner::new(
                [0u8; 32].to_vec(),
                std::time::Duration::from_secs(7 * 24 * 3600),
            ),
            enforce_ownership: false,
            compensate_failed_uploads: true,
            media_root_folder: "Readsy".to_string(),
        }
    }
}

impl BookConfig {
    /// Config sharing an existing signer (the auth crate's)
    pub fn with_signer(signer: SessionTokenSigner) -> Self {
        Self {
            signer,
            ..Default::default()
        }
    }
}
