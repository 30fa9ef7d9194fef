//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod fetch_user;
pub mod session;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use fetch_user::FetchUserUseCase;
pub use session::{issue_session, resolve_session};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
