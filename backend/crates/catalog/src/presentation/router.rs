//! Book Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use media::{CloudinaryGateway, MediaGateway};
use std::sync::Arc;

use crate::application::config::BookConfig;
use crate::domain::repository::BookRepository;
use crate::infra::postgres::PgBookRepository;
use crate::presentation::handlers::{self, BookAppState};
use crate::presentation::middleware::require_session;

/// Create the book router with PostgreSQL and Cloudinary
pub fn book_router(repo: PgBookRepository, media: CloudinaryGateway, config: BookConfig) -> Router {
    book_router_generic(repo, media, config)
}

/// Create a generic book router for any store and media gateway
pub fn book_router_generic<R, G>(repo: R, media: G, config: BookConfig) -> Router
where
    R: BookRepository + Clone + Send + Sync + 'static,
    G: MediaGateway + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let state = BookAppState {
        repo: Arc::new(repo),
        media: Arc::new(media),
        config: config.clone(),
    };

    let protected = Router::new()
        .route("/addBook", post(handlers::add_book::<R, G>))
        .route("/updateBook/{id}", post(handlers::update_book::<R, G>))
        .route("/deleteBook/{id}", delete(handlers::delete_book::<R, G>))
        .route_layer(middleware::from_fn_with_state(config, require_session));

    Router::new()
        .route("/fetchBooks", get(handlers::fetch_books::<R, G>))
        .route("/search", get(handlers::search_books::<R, G>))
        .route("/fetchBook/{id}", get(handlers::fetch_book::<R, G>))
        .merge(protected)
        .with_state(state)
}
