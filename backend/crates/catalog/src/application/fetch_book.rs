//! Fetch Book Use Case

use std::sync::Arc;

use crate::application::input::parse_book_id;
use crate::domain::entity::book::BookWithOwner;
use crate::domain::repository::BookRepository;
use crate::error::{BookError, BookResult};

pub struct FetchBookUseCase<R>
where
    R: BookRepository,
{
    repo: Arc<R>,
}

impl<R> FetchBookUseCase<R>
where
    R: BookRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, book_id: &str) -> BookResult<BookWithOwner> {
        let book_id = parse_book_id(book_id)?;

        self.repo
            .find_with_owner(&book_id)
            .await?
            .ok_or(BookError::NotFound)
    }
}
