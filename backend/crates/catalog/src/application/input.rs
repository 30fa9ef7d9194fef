//! Request input parsing shared by the book use cases

use kernel::id::BookId;

use crate::error::{BookError, BookResult};

/// Parse a path id into a [`BookId`]
pub fn parse_book_id(raw: &str) -> BookResult<BookId> {
    raw.trim().parse().map_err(|_| BookError::InvalidBookId)
}
