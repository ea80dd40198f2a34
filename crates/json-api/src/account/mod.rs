//! Account Self-Service

mod errors;
mod handlers;
mod models;

pub(crate) use handlers::*;
