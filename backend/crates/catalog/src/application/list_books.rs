//! List / Search Books Use Case
//!
//! Full catalog, newest first. No pagination.

use std::sync::Arc;

use crate::domain::entity::book::BookWithOwner;
use crate::domain::repository::BookRepository;
use crate::domain::value_object::search_term::SearchTerm;
use crate::error::BookResult;

pub struct ListBooksUseCase<R>
where
    R: BookRepository,
{
    repo: Arc<R>,
}

impl<R> ListBooksUseCase<R>
where
    R: BookRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every book
    pub async fn all(&self) -> BookResult<Vec<BookWithOwner>> {
        self.repo.list(None).await
    }

    /// Books whose title contains `term`, case-insensitively
    ///
    /// A missing or blank term behaves like [`Self::all`].
    pub async fn search(&self, term: Option<&str>) -> BookResult<Vec<BookWithOwner>> {
        let term = SearchTerm::parse(term);
        self.repo.list(term.as_ref()).await
    }
}
