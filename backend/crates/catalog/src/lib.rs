//! Catalog (Books) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Book entity, value objects, repository trait
//! - `application/` - Book workflow use cases
//! - `infra/` - Database implementation
//! - `presentation/` - HTTP handlers, session middleware, router
//!
//! ## Workflow
//! - addBook uploads cover then PDF, and only then inserts the record
//! - updateBook replaces media per kind: delete old, upload new, stage URL
//! - deleteBook attempts both media deletions before removing the record
//! - Media deletions are best-effort; uploads are fatal on failure
//!
//! ## Authorization
//! Mutations need a valid session cookie. Ownership of the book is only
//! checked when `BookConfig::enforce_ownership` is set.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::BookConfig;
pub use error::{BookError, BookResult};
pub use infra::postgres::PgBookRepository;
pub use presentation::router::{book_router, book_router_generic};
