//! Media Upload Gateway
//!
//! Stores book covers and PDFs on a remote media host and removes them again.
//!
//! - `domain/` - Asset types and the [`MediaGateway`] port
//! - `application/` - Gateway configuration
//! - `infra/` - Cloudinary REST implementation
//!
//! Every upload returns a [`MediaHandle`] alongside the URL; callers persist
//! it and hand it back for deletion.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

pub use application::config::MediaConfig;
pub use domain::gateway::{LocalMediaGateway, MediaGateway};
pub use domain::media::{MediaFolder, MediaHandle, MediaPayload, UploadedAsset};
pub use error::{MediaError, MediaResult};
pub use infra::cloudinary::CloudinaryGateway;
