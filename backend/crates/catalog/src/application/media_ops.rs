//! Best-effort media cleanup shared by the book use cases

use kernel::id::BookId;
use media::{MediaGateway, MediaHandle};

/// Delete an asset, logging instead of failing
///
/// Returns whether the host confirmed the deletion.
pub(crate) async fn discard_media<G>(
    media: &G,
    handle: Option<MediaHandle>,
    book_id: Option<&BookId>,
    reason: &'static str,
) -> bool
where
    G: MediaGateway,
{
    let Some(handle) = handle else {
        tracing::warn!(
            book_id = ?book_id.map(|id| id.to_string()),
            reason,
            "No media handle to delete"
        );
        return false;
    };

    match media.delete(&handle).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                book_id = ?book_id.map(|id| id.to_string()),
                public_id = %handle.public_id,
                reason,
                error = %e,
                "Failed to delete media asset"
            );
            false
        }
    }
}
