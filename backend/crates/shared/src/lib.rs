//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the `auth` and `catalog` domains:
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed identifiers for users and books
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
