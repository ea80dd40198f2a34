//! Extension traits

mod depot;
mod query;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use query::{into_page, parse_optional};
pub(crate) use result::ResultExt as _;
