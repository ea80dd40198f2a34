//! Authentication

pub(crate) mod cookie;
mod errors;
mod handlers;
pub(crate) mod middleware;
mod models;
pub(crate) mod roles;

pub(crate) use handlers::*;
pub(crate) use models::*;
