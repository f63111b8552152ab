//! AWS-oriented adapters and handlers for the table row-count service.
//!
//! This crate owns runtime integration details: the Lambda entry-point
//! adapter, the Postgres repository adapter, and environment configuration.
//! Domain contracts and the service layer live in `crates/table_count_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
