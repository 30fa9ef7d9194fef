//! Value Object Module

pub mod book_text;
pub mod search_term;
