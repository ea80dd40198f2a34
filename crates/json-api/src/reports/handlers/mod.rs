//! Report Handlers

pub(crate) mod artisan_dashboard;
pub(crate) mod artisan_earnings;
pub(crate) mod customer_dashboard;
