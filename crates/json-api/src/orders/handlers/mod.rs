//! Order Handlers

pub(crate) mod add_note;
pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod customer_index;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod stats;
pub(crate) mod update_payment;
pub(crate) mod update_status;
