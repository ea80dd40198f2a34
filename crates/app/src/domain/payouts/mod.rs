//! Payouts

pub mod data;
pub mod errors;
pub mod fees;
pub mod lifecycle;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::PayoutsServiceError;
pub use service::*;
