//! st-core - Core library for Strata
//!
//! This crate provides the migration and catalog types, plan resolution,
//! directory and embedded loading, stub scaffolding, and configuration
//! parsing used across all Strata components.

pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod migration;
pub mod migration_name;
pub mod naming;
pub mod records;
pub mod resolver;
pub mod scaffold;
pub mod schema;
pub(crate) mod serde_helpers;

pub use catalog::Catalog;
pub use config::{Config, NamingScheme};
pub use error::{CoreError, CoreResult, PlanError, PlanResult};
#[cfg(feature = "embed")]
pub use loader::EmbeddedSource;
pub use loader::{load_catalog, DirSource, MigrationSource};
pub use migration::{Direction, Migration};
pub use migration_name::MigrationName;
pub use records::{LogEntry, LogOperation, StateEntry};
pub use resolver::{backward_plan, forward_plan, BackwardPlan, ForwardPlan};
