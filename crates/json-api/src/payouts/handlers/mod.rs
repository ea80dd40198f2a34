//! Payout Handlers

pub(crate) mod admin_index;
pub(crate) mod balance;
pub(crate) mod cancel;
pub(crate) mod index;
pub(crate) mod request;
pub(crate) mod update_status;
