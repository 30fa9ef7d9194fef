//! Server configuration from environment variables
//!
//! `.env` is loaded by `main` before [`ApiConfig::from_env`] runs.

use std::env;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use catalog::BookConfig;
use media::MediaConfig;
use platform::token::SessionTokenSigner;

/// Base64 JSON media can be large
const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

const DEFAULT_PORT: u16 = 5000;

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173";

pub struct ApiConfig {
    pub database_url: String,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub production: bool,
    pub session_secret: Vec<u8>,
    pub password_pepper: Option<Vec<u8>>,
    pub media: MediaConfig,
    pub enforce_ownership: bool,
    pub compensate_failed_uploads: bool,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let production = env::var("APP_ENV").is_ok_and(|v| v.eq_ignore_ascii_case("production"));

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().with_context(|| format!("Invalid PORT: {}", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let frontend_origins = split_origins(
            &env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        let max_body_bytes = match env::var("MAX_BODY_BYTES") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid MAX_BODY_BYTES: {}", raw))?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };

        let session_secret = load_session_secret()?;

        let password_pepper = match env::var("PASSWORD_PEPPER") {
            Ok(raw) => Some(
                platform::crypto::from_base64(raw.trim()).context("PASSWORD_PEPPER must be base64")?,
            ),
            Err(_) => None,
        };

        let media = MediaConfig {
            cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            api_key: required("CLOUDINARY_API_KEY")?,
            api_secret: required("CLOUDINARY_API_SECRET")?,
            root_folder: env::var("CLOUDINARY_ROOT_FOLDER").unwrap_or_else(|_| "Readsy".to_string()),
            timeout: Duration::from_secs(60),
            ..MediaConfig::default()
        };

        Ok(Self {
            database_url,
            port,
            frontend_origins,
            max_body_bytes,
            production,
            session_secret,
            password_pepper,
            media,
            enforce_ownership: flag("BOOKS_ENFORCE_OWNERSHIP", false)?,
            compensate_failed_uploads: flag("BOOKS_COMPENSATE_UPLOADS", true)?,
        })
    }

    /// One signer shared by the auth and book routes
    pub fn signer(&self) -> SessionTokenSigner {
        SessionTokenSigner::new(self.session_secret.clone(), auth::application::config::SESSION_TTL)
    }

    pub fn auth_config(&self, signer: SessionTokenSigner) -> AuthConfig {
        AuthConfig {
            signer,
            cookie_secure: self.production,
            password_pepper: self.password_pepper.clone(),
            ..AuthConfig::default()
        }
    }

    pub fn book_config(&self, signer: SessionTokenSigner) -> BookConfig {
        BookConfig {
            enforce_ownership: self.enforce_ownership,
            compensate_failed_uploads: self.compensate_failed_uploads,
            media_root_folder: self.media.root_folder.clone(),
            ..BookConfig::with_signer(signer)
        }
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("{} must be set", name))
}

fn flag(name: &str, default: bool) -> anyhow::Result<bool> {
    parse_flag(name, env::var(name).ok().as_deref(), default)
}

fn parse_flag(name: &str, raw: Option<&str>, default: bool) -> anyhow::Result<bool> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("Invalid boolean for {}: {}", name, other),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

/// `SESSION_SECRET` (base64, 32 bytes); random in debug builds when unset
fn load_session_secret() -> anyhow::Result<Vec<u8>> {
    match env::var("SESSION_SECRET") {
        Ok(secret_b64) => {
            let secret = platform::crypto::from_base64(secret_b64.trim())
                .context("SESSION_SECRET must be base64")?;
            if secret.len() != 32 {
                bail!("SESSION_SECRET must decode to 32 bytes, got {}", secret.len());
            }
            Ok(secret)
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("SESSION_SECRET not set, using a random secret; sessions end on restart");
            Ok(platform::crypto::random_bytes(32))
        }
        Err(_) => bail!("SESSION_SECRET must be set in production"),
    }
}
