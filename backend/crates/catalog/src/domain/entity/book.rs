//! Book Entity

use chrono::{DateTime, Utc};
use kernel::id::{BookId, UserId};
use media::{MediaFolder, MediaHandle, UploadedAsset};

use crate::domain::value_object::book_text::RequiredText;

/// A media asset referenced by a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub url: String,
    /// Missing on rows written before handles were persisted
    pub handle: Option<MediaHandle>,
}

impl StoredMedia {
    /// Handle to delete this asset with, deriving one from the URL if needed
    pub fn deletion_handle(&self, folder: MediaFolder, root_folder: &str) -> Option<MediaHandle> {
        self.handle
            .clone()
            .or_else(|| MediaHandle::derive_from_url(&self.url, folder, root_folder))
    }
}

impl From<UploadedAsset> for StoredMedia {
    fn from(asset: UploadedAsset) -> Self {
        Self {
            url: asset.url,
            handle: Some(asset.handle),
        }
    }
}

/// A catalog record
#[derive(Debug, Clone)]
pub struct Book {
    pub book_id: BookId,
    pub image: StoredMedia,
    pub pdf: StoredMedia,
    pub title: RequiredText,
    pub subtitle: Option<String>,
    pub author: RequiredText,
    pub review: Option<String>,
    /// Creator; never reassigned
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        image: StoredMedia,
        pdf: StoredMedia,
        title: RequiredText,
        subtitle: Option<String>,
        author: RequiredText,
        review: Option<String>,
        owner_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            book_id: BookId::new(),
            image,
            pdf,
            title,
            subtitle,
            author,
            review,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Public owner reference shown with a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookOwner {
    pub user_id: UserId,
    pub user_name: String,
}

/// A book with its owner resolved
#[derive(Debug, Clone)]
pub struct BookWithOwner {
    pub book: Book,
    pub owner: BookOwner,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(url: &str, handle: Option<MediaHandle>) -> StoredMedia {
        StoredMedia {
            url: url.to_string(),
            handle,
        }
    }

    #[test]
    fn test_deletion_handle_prefers_persisted() {
        let stored = media(
            "https://res.cloudinary.com/demo/image/upload/v1/Readsy/images/aaa.png",
            Some(MediaHandle::new("Readsy/images/persisted", "image")),
        );
        assert_eq!(
            stored
                .deletion_handle(MediaFolder::Images, "Readsy")
                .unwrap()
                .public_id,
            "Readsy/images/persisted"
        );
    }

    #[test]
    fn test_deletion_handle_falls_back_to_url() {
        let stored = media(
            "https://res.cloudinary.com/demo/image/upload/v1/Readsy/pdfs/legacy.pdf",
            None,
        );
        let handle = stored.deletion_handle(MediaFolder::Pdfs, "Readsy").unwrap();
        assert_eq!(handle.public_id, "Readsy/pdfs/legacy");
    }

    #[test]
    fn test_ownership() {
        let owner = UserId::new();
        let book = Book::new(
            media("https://x/a.png", None),
            media("https://x/a.pdf", None),
            RequiredText::new("title", "Dune").unwrap(),
            None,
            RequiredText::new("author", "Frank Herbert").unwrap(),
            None,
            owner,
        );
        assert!(book.is_owned_by(&owner));
        assert!(!book.is_owned_by(&UserId::new()));
    }
}
