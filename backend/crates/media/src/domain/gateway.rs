//! Media Gateway Port

use crate::domain::media::{MediaFolder, MediaHandle, MediaPayload, UploadedAsset};
use crate::error::MediaResult;

/// Remote content host for book media
#[trait_variant::make(MediaGateway: Send)]
pub trait LocalMediaGateway {
    /// Upload synchronously and return the retrieval URL with its handle
    async fn upload(&self, payload: &MediaPayload, folder: MediaFolder)
    -> MediaResult<UploadedAsset>;

    /// Remove a previously uploaded asset
    ///
    /// Callers treat failures as warnings; an asset the host no longer knows
    /// is not an error.
    async fn delete(&self, handle: &MediaHandle) -> MediaResult<()>;
}
