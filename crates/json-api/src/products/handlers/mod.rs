//! Product Handlers

pub(crate) mod artisan_index;
pub(crate) mod categories;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod review;
pub(crate) mod stats;
pub(crate) mod update;
