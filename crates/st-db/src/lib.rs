//! st-db - Store abstraction layer for Strata
//!
//! This crate provides the `Store` trait the executor runs migrations
//! against, and its DuckDB implementation.

pub mod duckdb_store;
pub mod error;
pub mod traits;

pub use duckdb_store::DuckDbStore;
pub use error::{DbError, DbResult};
pub use traits::Store;
