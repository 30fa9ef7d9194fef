//! Infrastructure Layer

pub mod cloudinary;

pub use cloudinary::CloudinaryGateway;
