//! Tantika marketplace domain, persistence and services.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod pagination;

#[cfg(test)]
mod test;

pub mod uuids;
