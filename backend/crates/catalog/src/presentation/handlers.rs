//! HTTP Handlers

use axum::extract::{Extension, Path, Query, State};
use axum::Json;
use axum_extra::extract::WithRejection;
use media::MediaGateway;
use std::sync::Arc;

use crate::application::config::BookConfig;
use crate::application::{
    AddBookInput, AddBookUseCase, DeleteBookUseCase, FetchBookUseCase, ListBooksUseCase,
    UpdateBookInput, UpdateBookUseCase,
};
use crate::domain::repository::BookRepository;
use crate::error::{BookError, BookResult};
use crate::presentation::dto::{
    AddBookRequest, BookEnvelope, BookResponse, BooksEnvelope, MessageResponse, SearchQuery,
    UpdateBookRequest,
};
use crate::presentation::middleware::SessionUser;

/// Shared state for book handlers
#[derive(Clone)]
pub struct BookAppState<R, G>
where
    R: BookRepository + Clone + Send + Sync + 'static,
    G: MediaGateway + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub media: Arc<G>,
    pub config: Arc<BookConfig>,
}

// ============================================================================
// Mutations (session required)
// ============================================================================

/// POST /api/addBook
pub async fn add_book<R, G>(
    State(state): State<BookAppState<R, G>>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    WithRejection(Json(req), _): WithRejection<Json<AddBookRequest>, BookError>,
) -> BookResult<Json<BookEnvelope>>
where
    R: BookRepository + Clone + Send + Sync + 'static,
    G: MediaGateway + Clone + Send + Sync + 'static,
{
    let use_case = AddBookUseCase::new(state.repo.clone(), state.media.clone(), state.config.clone());

    let book = use_case
        .execute(
            user_id,
            AddBookInput {
                image: req.image,
                pdf: req.pdf,
                title: req.title,
                subtitle: req.subtitle,
                author: req.author,
                review: req.review,
            },
        )
        .await?;

    Ok(Json(BookEnvelope {
        book: book.into(),
        message: "Book added successfully",
    }))
}

/// POST /api/updateBook/{id}
pub async fn update_book<R, G>(
    State(state): State<BookAppState<R, G>>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Path(book_id): Path<String>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateBookRequest>, BookError>,
) -> BookResult<Json<BookEnvelope>>
where
    R: BookRepository + Clone + Send + Sync + 'static,
    G: MediaGateway + Clone + Send + Sync + 'static,
{
    let use_case =
        UpdateBookUseCase::new(state.repo.clone(), state.media.clone(), state.config.clone());

    let book = use_case
        .execute(
            user_id,
            &book_id,
            UpdateBookInput {
                image: req.image,
                pdf: req.pdf,
                title: req.title,
                subtitle: req.subtitle,
                author: req.author,
                review: req.review,
            },
        )
        .await?;

    Ok(Json(BookEnvelope {
        book: book.into(),
        message: "Book updated successfully",
    }))
}

/// DELETE /api/deleteBook/{id}
pub async fn delete_book<R, G>(
    State(state): State<BookAppState<R, G>>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Path(book_id): Path<String>,
) -> BookResult<Json<MessageResponse>>
where
    R: BookRepository + Clone + Send + Sync + 'static,
    G: MediaGateway + Clone + Send + Sync + 'static,
{
    let use_case =
        DeleteBookUseCase::new(state.repo.clone(), state.media.clone(), state.config.clone());

    use_case.execute(user_id, &book_id).await?;

    Ok(Json(MessageResponse {
        message: "Book deleted successfully",
    }))
}

// ============================================================================
// Reads (public)
// ============================================================================

/// GET /api/fetchBooks
pub async fn fetch_books<R, G>(
    State(state): State<BookAppState<R, G>>,
) -> BookResult<Json<BooksEnvelope>>
where
    R: BookRepository + Clone + Send + Sync + 'static,
    G: MediaGateway + Clone + Send + Sync + 'static,
{
    let books = ListBooksUseCase::new(state.repo.clone()).all().await?;

    Ok(Json(BooksEnvelope {
        books: books.into_iter().map(BookResponse::from).collect(),
        message: "Books fetched successfully",
    }))
}

/// GET /api/search?searchTerm=
pub async fn search_books<R, G>(
    State(state): State<BookAppState<R, G>>,
    Query(query): Query<SearchQuery>,
) -> BookResult<Json<BooksEnvelope>>
where
    R: BookRepository + Clone + Send + Sync + 'static,
    G: MediaGateway + Clone + Send + Sync + 'static,
{
    let books = ListBooksUseCase::new(state.repo.clone())
        .search(query.search_term.as_deref())
        .await?;

    Ok(Json(BooksEnvelope {
        books: books.into_iter().map(BookResponse::from).collect(),
        message: "Books fetched successfully",
    }))
}

/// GET /api/fetchBook/{id}
pub async fn fetch_book<R, G>(
    State(state): State<BookAppState<R, G>>,
    Path(book_id): Path<String>,
) -> BookResult<Json<BookEnvelope>>
where
    R: BookRepository + Clone + Send + Sync + 'static,
    G: MediaGateway + Clone + Send + Sync + 'static,
{
    let book = FetchBookUseCase::new(state.repo.clone())
        .execute(&book_id)
        .await?;

    Ok(Json(BookEnvelope {
        book: book.into(),
        message: "Book fetched successfully",
    }))
}
