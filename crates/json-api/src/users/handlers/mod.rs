//! User Administration Handlers

pub(crate) mod bulk_update;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod set_status;
pub(crate) mod stats;
pub(crate) mod update;
