//! Authentication

mod errors;
mod models;
mod passwords;
pub(crate) mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use passwords::*;
pub(crate) use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
