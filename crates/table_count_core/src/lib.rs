//! Platform-free domain primitives for the table row-count service.
//!
//! This crate owns the request/response contract, the error taxonomy, and
//! the repository port plus the service layered on top of it. It
//! intentionally excludes AWS SDK, Lambda runtime, and database driver
//! concerns; those live in `crates/table_count_lambda`.

pub mod contract;
pub mod error;
pub mod service;
