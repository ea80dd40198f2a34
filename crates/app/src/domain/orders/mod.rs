//! Orders

pub mod data;
pub mod errors;
pub mod lifecycle;
pub mod pricing;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
