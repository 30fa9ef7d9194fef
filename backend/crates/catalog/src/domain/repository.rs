//! Repository Traits

use kernel::id::{BookId, UserId};

use crate::domain::entity::book::{Book, BookOwner, BookWithOwner};
use crate::domain::value_object::search_term::SearchTerm;
use crate::error::BookResult;

/// Catalog store
#[trait_variant::make(BookRepository: Send)]
pub trait LocalBookRepository {
    async fn create(&self, book: &Book) -> BookResult<()>;

    async fn find_by_id(&self, book_id: &BookId) -> BookResult<Option<Book>>;

    async fn find_with_owner(&self, book_id: &BookId) -> BookResult<Option<BookWithOwner>>;

    /// All books, newest first, optionally filtered by title
    async fn list(&self, term: Option<&SearchTerm>) -> BookResult<Vec<BookWithOwner>>;

    /// Overwrite every mutable column of an existing book
    async fn update(&self, book: &Book) -> BookResult<()>;

    /// Returns whether a row was removed
    async fn delete(&self, book_id: &BookId) -> BookResult<bool>;

    /// Owner reference for a user id (reads the users table)
    async fn find_owner(&self, user_id: &UserId) -> BookResult<Option<BookOwner>>;
}
