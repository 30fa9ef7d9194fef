//! Presentation Layer
//!
//! HTTP handlers, DTOs, session middleware and router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::BookAppState;
pub use middleware::{SessionUser, require_session};
pub use router::{book_router, book_router_generic};
