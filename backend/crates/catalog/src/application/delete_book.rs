//! Delete Book Use Case
//!
//! Removes both media assets (each attempted regardless of the other), then
//! the catalog record.

use std::sync::Arc;

use kernel::id::UserId;
use media::{MediaFolder, MediaGateway};

use crate::application::config::BookConfig;
use crate::application::input::parse_book_id;
use crate::application::media_ops::discard_media;
use crate::domain::repository::BookRepository;
use crate::error::{BookError, BookResult};

pub struct DeleteBookUseCase<R, G>
where
    R: BookRepository,
    G: MediaGateway,
{
    repo: Arc<R>,
    media: Arc<G>,
    config: Arc<BookConfig>,
}

impl<R, G> DeleteBookUseCase<R, G>
where
    R: BookRepository,
    G: MediaGateway,
{
    pub fn new(repo: Arc<R>, media: Arc<G>, config: Arc<BookConfig>) -> Self {
        Self {
            repo,
            media,
            config,
        }
    }

    pub async fn execute(&self, acting_user: UserId, book_id: &str) -> BookResult<()> {
        let book_id = parse_book_id(book_id)?;

        let book = self
            .repo
            .find_by_id(&book_id)
            .await?
            .ok_or(BookError::NotFound)?;

        if self.config.enforce_ownership && !book.is_owned_by(&acting_user) {
            return Err(BookError::NotOwner);
        }

        let root = &self.config.media_root_folder;
        let image_deleted = discard_media(
            self.media.as_ref(),
            book.image.deletion_handle(MediaFolder::Images, root),
            Some(&book_id),
            "delete_book",
        )
        .await;
        let pdf_deleted = discard_media(
            self.media.as_ref(),
            book.pdf.deletion_handle(MediaFolder::Pdfs, root),
            Some(&book_id),
            "delete_book",
        )
        .await;

        if !self.repo.delete(&book_id).await? {
            return Err(BookError::NotFound);
        }

        tracing::info!(
            book_id = %book_id,
            user_id = %acting_user,
            image_deleted,
            pdf_deleted,
            "Book deleted"
        );

        Ok(())
    }
}
