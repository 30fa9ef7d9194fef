//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Signup with user name, email and password
//! - Login by email and password
//! - Stateless session tokens carried in an HttpOnly `token` cookie
//! - Logout clears the cookie only (no server-side revocation)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Session tokens are HS256 JWTs valid for 7 days
//! - Unknown email and wrong password produce the same error

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
