//! Add Book Use Case
//!
//! Uploads the cover and the PDF, then inserts the catalog record.
//! Both uploads finish before the insert; no record exists if either fails.

use std::sync::Arc;

use kernel::id::UserId;
use media::{MediaFolder, MediaGateway, MediaHandle, MediaPayload, UploadedAsset};

use crate::application::config::BookConfig;
use crate::application::media_ops::discard_media;
use crate::domain::entity::book::{Book, BookWithOwner};
use crate::domain::repository::BookRepository;
use crate::domain::value_object::book_text::{RequiredText, optional_text};
use crate::error::{BookError, BookResult};

pub struct AddBookInput {
    pub image: String,
    pub pdf: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub review: Option<String>,
}

/// Validated text fields, ready to persist
struct BookFields {
    title: RequiredText,
    subtitle: Option<String>,
    author: RequiredText,
    review: Option<String>,
}

pub struct AddBookUseCase<R, G>
where
    R: BookRepository,
    G: MediaGateway,
{
    repo: Arc<R>,
    media: Arc<G>,
    config: Arc<BookConfig>,
}

impl<R, G> AddBookUseCase<R, G>
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

    pub async fn execute(&self, acting_user: UserId, input: AddBookInput) -> BookResult<BookWithOwner> {
        if [&input.image, &input.pdf, &input.title, &input.author]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(BookError::Validation(
                "Image, PDF, title and author are required".to_string(),
            ));
        }

        let fields = BookFields {
            title: RequiredText::new("title", &input.title)?,
            subtitle: optional_text(input.subtitle.as_deref()),
            author: RequiredText::new("author", &input.author)?,
            review: optional_text(input.review.as_deref()),
        };

        let image = self
            .media
            .upload(&MediaPayload::new(input.image), MediaFolder::Images)
            .await?;

        let pdf = match self
            .media
            .upload(&MediaPayload::new(input.pdf), MediaFolder::Pdfs)
            .await
        {
            Ok(pdf) => pdf,
            Err(e) => {
                self.compensate(vec![image.handle]).await;
                return Err(e.into());
            }
        };

        let uploaded = vec![image.handle.clone(), pdf.handle.clone()];
        let result = self.persist(acting_user, image, pdf, fields).await;
        if result.is_err() {
            self.compensate(uploaded).await;
        }
        result
    }

    async fn persist(
        &self,
        acting_user: UserId,
        image: UploadedAsset,
        pdf: UploadedAsset,
        fields: BookFields,
    ) -> BookResult<BookWithOwner> {
        // A valid token whose user is gone is treated as an invalid session.
        let owner = self
            .repo
            .find_owner(&acting_user)
            .await?
            .ok_or(BookError::AuthInvalid)?;

        let book = Book::new(
            image.into(),
            pdf.into(),
            fields.title,
            fields.subtitle,
            fields.author,
            fields.review,
            acting_user,
        );

        self.repo.create(&book).await?;

        tracing::info!(
            book_id = %book.book_id,
            user_id = %acting_user,
            title = %book.title,
            "Book added"
        );

        Ok(BookWithOwner { book, owner })
    }

    /// Remove assets uploaded by a request that then failed
    async fn compensate(&self, handles: Vec<MediaHandle>) {
        if !self.config.compensate_failed_uploads {
            tracing::warn!(
                orphaned = handles.len(),
                "addBook failed after upload; assets left on media host"
            );
            return;
        }

        for handle in handles {
            discard_media(self.media.as_ref(), Some(handle), None, "add_book_rollback").await;
        }
    }
}
