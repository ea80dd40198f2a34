//! Artisans

pub mod data;
pub mod errors;
pub mod lifecycle;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::ArtisansServiceError;
pub use service::*;
