//! Media Host Configuration

use std::time::Duration;

/// Default Cloudinary REST endpoint
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Cloudinary account and upload settings
#[derive(Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Prefix for the `images` and `pdfs` folders
    pub root_folder: String,
    /// Base URL without trailing slash (overridden in tests)
    pub api_base: String,
    /// Per-request timeout; uploads of large PDFs dominate
    pub timeout: Duration,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            root_folder: "Readsy".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl MediaConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Default::default()
        }
    }

    /// `{api_base}/{cloud}/{resource_type}/{action}`
    pub fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.cloud_name,
            resource_type,
            action
        )
    }
}

impl std::fmt::Debug for MediaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("root_folder", &self.root_folder)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}
