//! Domain Layer

pub mod gateway;
pub mod media;
