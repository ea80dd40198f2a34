//! Artisans
//!
//! Admin review of artisan applications plus the artisan's own profile and
//! bank details.

mod errors;
mod handlers;
mod models;

pub(crate) use handlers::*;
