//! Application Layer
//!
//! Book workflow use cases.

pub mod add_book;
pub mod config;
pub mod delete_book;
pub mod fetch_book;
pub mod input;
pub mod list_books;
pub(crate) mod media_ops;
pub mod session;
pub mod update_book;

// Re-exports
pub use add_book::{AddBookInput, AddBookUseCase};
pub use config::BookConfig;
pub use delete_book::DeleteBookUseCase;
pub use fetch_book::FetchBookUseCase;
pub use list_books::ListBooksUseCase;
pub use session::authenticate;
pub use update_book::{UpdateBookInput, UpdateBookUseCase};
