//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, SHA-1, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Stateless session tokens (HS256 JWT)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
