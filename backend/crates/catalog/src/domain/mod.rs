//! Domain Layer
//!
//! Book entity, field value objects, and the catalog store trait.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::book::{Book, BookOwner, BookWithOwner, StoredMedia};
pub use repository::BookRepository;
