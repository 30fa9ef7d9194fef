//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{BookId, UserId};
use media::MediaHandle;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::book::{Book, BookOwner, BookWithOwner, StoredMedia};
use crate::domain::repository::BookRepository;
use crate::domain::value_object::{book_text::RequiredText, search_term::SearchTerm};
use crate::error::BookResult;

/// Column list shared by every owner-joined query
const BOOK_WITH_OWNER_COLUMNS: &str = r#"
    b.book_id,
    b.image_url,
    b.image_public_id,
    b.image_resource_type,
    b.pdf_url,
    b.pdf_public_id,
    b.pdf_resource_type,
    b.title,
    b.subtitle,
    b.author,
    b.review,
    b.owner_id,
    b.created_at,
    b.updated_at,
    u.user_name AS owner_user_name
"#;

/// PostgreSQL-backed catalog store
#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BookRepository for PgBookRepository {
    async fn create(&self, book: &Book) -> BookResult<()> {
        let (image_public_id, image_resource_type) = handle_columns(&book.image);
        let (pdf_public_id, pdf_resource_type) = handle_columns(&book.pdf);

        sqlx::query(
            r#"
            INSERT INTO books (
                book_id,
                image_url,
                image_public_id,
                image_resource_type,
                pdf_url,
                pdf_public_id,
                pdf_resource_type,
                title,
                subtitle,
                author,
                review,
                owner_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(book.book_id.as_uuid())
        .bind(&book.image.url)
        .bind(image_public_id)
        .bind(image_resource_type)
        .bind(&book.pdf.url)
        .bind(pdf_public_id)
        .bind(pdf_resource_type)
        .bind(book.title.as_str())
        .bind(book.subtitle.as_deref())
        .bind(book.author.as_str())
        .bind(book.review.as_deref())
        .bind(book.owner_id.as_uuid())
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, book_id: &BookId) -> BookResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT
                book_id,
                image_url,
                image_public_id,
                image_resource_type,
                pdf_url,
                pdf_public_id,
                pdf_resource_type,
                title,
                subtitle,
                author,
                review,
                owner_id,
                created_at,
                updated_at
            FROM books
            WHERE book_id = $1
            "#,
        )
        .bind(book_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookRow::into_book))
    }

    async fn find_with_owner(&self, book_id: &BookId) -> BookResult<Option<BookWithOwner>> {
        let sql = format!(
            "SELECT {} FROM books b JOIN users u ON u.user_id = b.owner_id WHERE b.book_id = $1",
            BOOK_WITH_OWNER_COLUMNS
        );

        let row = sqlx::query_as::<_, BookWithOwnerRow>(&sql)
            .bind(book_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(BookWithOwnerRow::into_book_with_owner))
    }

    async fn list(&self, term: Option<&SearchTerm>) -> BookResult<Vec<BookWithOwner>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM books b
            JOIN users u ON u.user_id = b.owner_id
            WHERE $1::text IS NULL OR b.title ILIKE $1 ESCAPE '\'
            ORDER BY b.created_at DESC
            "#,
            BOOK_WITH_OWNER_COLUMNS
        );

        let rows = sqlx::query_as::<_, BookWithOwnerRow>(&sql)
            .bind(term.map(SearchTerm::like_pattern))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(BookWithOwnerRow::into_book_with_owner)
            .collect())
    }

    async fn update(&self, book: &Book) -> BookResult<()> {
        let (image_public_id, image_resource_type) = handle_columns(&book.image);
        let (pdf_public_id, pdf_resource_type) = handle_columns(&book.pdf);

        sqlx::query(
            r#"
            UPDATE books SET
                image_url = $2,
                image_public_id = $3,
                image_resource_type = $4,
                pdf_url = $5,
                pdf_public_id = $6,
                pdf_resource_type = $7,
                title = $8,
                subtitle = $9,
                author = $10,
                review = $11,
                updated_at = $12
            WHERE book_id = $1
            "#,
        )
        .bind(book.book_id.as_uuid())
        .bind(&book.image.url)
        .bind(image_public_id)
        .bind(image_resource_type)
        .bind(&book.pdf.url)
        .bind(pdf_public_id)
        .bind(pdf_resource_type)
        .bind(book.title.as_str())
        .bind(book.subtitle.as_deref())
        .bind(book.author.as_str())
        .bind(book.review.as_deref())
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, book_id: &BookId) -> BookResult<bool> {
        let deleted = sqlx::query("DELETE FROM books WHERE book_id = $1")
            .bind(book_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn find_owner(&self, user_id: &UserId) -> BookResult<Option<BookOwner>> {
        let row = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT user_id, user_name FROM users WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(user_id, user_name)| BookOwner {
            user_id: UserId::from_uuid(user_id),
            user_name,
        }))
    }
}

fn handle_columns(media: &StoredMedia) -> (Option<&str>, Option<&str>) {
    match &media.handle {
        Some(handle) => (
            Some(handle.public_id.as_str()),
            Some(handle.resource_type.as_str()),
        ),
        None => (None, None),
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct BookRow {
    book_id: Uuid,
    image_url: String,
    image_public_id: Option<String>,
    image_resource_type: Option<String>,
    pdf_url: String,
    pdf_public_id: Option<String>,
    pdf_resource_type: Option<String>,
    title: String,
    subtitle: Option<String>,
    author: String,
    review: Option<String>,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn stored_media(url: String, public_id: Option<String>, resource_type: Option<String>) -> StoredMedia {
    StoredMedia {
        url,
        handle: public_id.map(|id| {
            MediaHandle::new(id, resource_type.unwrap_or_else(|| "image".to_string()))
        }),
    }
}

impl BookRow {
    fn into_book(self) -> Book {
        Book {
            book_id: BookId::from_uuid(self.book_id),
            image: stored_media(self.image_url, self.image_public_id, self.image_resource_type),
            pdf: stored_media(self.pdf_url, self.pdf_public_id, self.pdf_resource_type),
            title: RequiredText::from_db(self.title),
            subtitle: self.subtitle,
            author: RequiredText::from_db(self.author),
            review: self.review,
            owner_id: UserId::from_uuid(self.owner_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookWithOwnerRow {
    #[sqlx(flatten)]
    book: BookRow,
    owner_user_name: String,
}

impl BookWithOwnerRow {
    fn into_book_with_owner(self) -> BookWithOwner {
        let book = self.book.into_book();
        let owner = BookOwner {
            user_id: book.owner_id,
            user_name: self.owner_user_name,
        };
        BookWithOwner { book, owner }
    }
}
