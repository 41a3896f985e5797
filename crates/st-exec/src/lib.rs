//! st-exec - Plan execution for Strata
//!
//! This crate runs resolved forward and backward plans against a `Store`,
//! gates them behind an optional confirmation, and ties catalog, state and
//! resolver together in `Migrator`.

pub mod confirm;
pub mod error;
pub mod executor;
pub mod migrator;

pub use confirm::{Confirm, PromptConfirm};
pub use error::{ExecError, ExecResult};
pub use executor::{ApplyMode, Executor, RunReport};
pub use migrator::{MigrationStatus, Migrator, Status};
