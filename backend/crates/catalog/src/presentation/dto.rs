//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::book::BookWithOwner;

// ============================================================================
// Requests
// ============================================================================

/// addBook body; media fields carry a data URI, bare base64 or a URL
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddBookRequest {
    pub image: String,
    pub pdf: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub review: Option<String>,
}

/// updateBook body; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateBookRequest {
    pub image: Option<String>,
    pub pdf: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub review: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct OwnerResponse {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub image: String,
    pub pdf: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub review: Option<String>,
    pub owner: OwnerResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookWithOwner> for BookResponse {
    fn from(value: BookWithOwner) -> Self {
        let BookWithOwner { book, owner } = value;
        Self {
            id: book.book_id.into_uuid(),
            image: book.image.url,
            pdf: book.pdf.url,
            title: book.title.as_str().to_string(),
            subtitle: book.subtitle,
            author: book.author.as_str().to_string(),
            review: book.review,
            owner: OwnerResponse {
                id: owner.user_id.into_uuid(),
                username: owner.user_name,
            },
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookEnvelope {
    pub book: BookResponse,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BooksEnvelope {
    pub books: Vec<BookResponse>,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
