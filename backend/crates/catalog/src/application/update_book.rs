//! Update Book Use Case
//!
//! Partial update. Supplied text fields overwrite, absent ones are kept.
//! A supplied image or PDF replaces the stored asset: the old one is deleted
//! (best-effort), then the new one is uploaded (fatal on failure).
//!
//! When a later step fails, assets uploaded earlier in the same request are
//! deleted again. The old asset is already gone by then, so the record keeps
//! pointing at a deleted URL until the next successful update.

use std::sync::Arc;

use kernel::id::{BookId, UserId};
use media::{MediaFolder, MediaGateway, MediaHandle, MediaPayload};

use crate::application::config::BookConfig;
use crate::application::input::parse_book_id;
use crate::application::media_ops::discard_media;
use crate::domain::entity::book::{BookWithOwner, StoredMedia};
use crate::domain::repository::BookRepository;
use crate::domain::value_object::book_text::{RequiredText, optional_text};
use crate::error::{BookError, BookResult};

/// Fields to change; `None` leaves the stored value alone
#[derive(Debug, Default)]
pub struct UpdateBookInput {
    pub image: Option<String>,
    pub pdf: Option<String>,
    pub title: Option<String>,
    /// Blank clears the subtitle
    pub subtitle: Option<String>,
    pub author: Option<String>,
    /// Blank clears the review
    pub review: Option<String>,
}

pub struct UpdateBookUseCase<R, G>
where
    R: BookRepository,
    G: MediaGateway,
{
    repo: Arc<R>,
    media: Arc<G>,
    config: Arc<BookConfig>,
}

impl<R, G> UpdateBookUseCase<R, G>
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

    pub async fn execute(
        &self,
        acting_user: UserId,
        book_id: &str,
        input: UpdateBookInput,
    ) -> BookResult<BookWithOwner> {
        let book_id = parse_book_id(book_id)?;

        let mut book = self
            .repo
            .find_by_id(&book_id)
            .await?
            .ok_or(BookError::NotFound)?;

        if self.config.enforce_ownership && !book.is_owned_by(&acting_user) {
            return Err(BookError::NotOwner);
        }

        // Validate text before any media side effect.
        let title = input
            .title
            .as_deref()
            .map(|t| RequiredText::new("title", t))
            .transpose()?;
        let author = input
            .author
            .as_deref()
            .map(|a| RequiredText::new("author", a))
            .transpose()?;

        let mut staged: Vec<MediaHandle> = Vec::new();

        if let Some(payload) = supplied(input.image) {
            book.image = self
                .replace(&book_id, &book.image, payload, MediaFolder::Images)
                .await?;
            staged.extend(book.image.handle.clone());
        }
        if let Some(payload) = supplied(input.pdf) {
            match self
                .replace(&book_id, &book.pdf, payload, MediaFolder::Pdfs)
                .await
            {
                Ok(pdf) => {
                    book.pdf = pdf;
                    staged.extend(book.pdf.handle.clone());
                }
                Err(e) => {
                    self.compensate(&book_id, staged).await;
                    return Err(e);
                }
            }
        }

        if let Some(title) = title {
            book.title = title;
        }
        if let Some(author) = author {
            book.author = author;
        }
        if let Some(subtitle) = input.subtitle {
            book.subtitle = optional_text(Some(&subtitle));
        }
        if let Some(review) = input.review {
            book.review = optional_text(Some(&review));
        }
        book.touch();

        if let Err(e) = self.repo.update(&book).await {
            self.compensate(&book_id, staged).await;
            return Err(e);
        }

        tracing::info!(book_id = %book_id, user_id = %acting_user, "Book updated");

        self.repo
            .find_with_owner(&book_id)
            .await?
            .ok_or(BookError::NotFound)
    }

    async fn replace(
        &self,
        book_id: &BookId,
        current: &StoredMedia,
        payload: MediaPayload,
        folder: MediaFolder,
    ) -> BookResult<StoredMedia> {
        let old = current.deletion_handle(folder, &self.config.media_root_folder);
        discard_media(self.media.as_ref(), old, Some(book_id), "update_book_replace").await;

        let uploaded = self.media.upload(&payload, folder).await?;
        Ok(uploaded.into())
    }

    /// Remove assets this request uploaded before a later step failed
    async fn compensate(&self, book_id: &BookId, handles: Vec<MediaHandle>) {
        if handles.is_empty() {
            return;
        }
        if !self.config.compensate_failed_uploads {
            tracing::warn!(
                book_id = %book_id,
                orphaned = handles.len(),
                "updateBook failed after upload; assets left on media host"
            );
            return;
        }

        for handle in handles {
            discard_media(self.media.as_ref(), Some(handle), Some(book_id), "update_book_rollback").await;
        }
    }
}

/// A media field counts as supplied only when non-blank
fn supplied(value: Option<String>) -> Option<MediaPayload> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(MediaPayload::new)
}
