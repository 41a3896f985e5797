//! Error types for st-core

use thiserror::Error;

/// Core error type for Strata
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Two migrations share a name
    #[error("[C003] Duplicate migration name: {name}")]
    DuplicateMigration { name: String },

    /// C004: Migration name is empty
    #[error("[C004] Migration name must not be empty")]
    EmptyMigrationName,

    /// C005: Migration directory does not exist
    #[error("[C005] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// C006: SQL file is not valid UTF-8
    #[error("[C006] SQL file '{path}' is not valid UTF-8")]
    InvalidSql { path: String },

    /// C007: Label for a new migration is unusable
    #[error("[C007] Invalid migration label '{label}': {reason}")]
    InvalidLabel { label: String, reason: String },

    /// C008: Scaffold target already exists
    #[error("[C008] Migration directory already exists: {path}")]
    MigrationExists { path: String },

    /// C009: Existing migration directory name has no numeric prefix
    #[error("[C009] Cannot read sequence number from migration '{name}'")]
    BadSequenceNumber { name: String },

    /// C010: IO error
    #[error("[C010] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C011: IO error with file path context
    #[error("[C011] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C012: YAML parse error
    #[error("[C012] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Failures computing a forward or backward plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// P001: Catalog holds no migrations
    #[error("[P001] No migrations provided")]
    EmptyCatalog,

    /// P002: Nothing is applied, so nothing can be reversed
    #[error("[P002] State is empty, cannot migrate backward")]
    EmptyState,

    /// P003: Target is not in the catalog (forward) or not applied (backward)
    #[error("[P003] Unknown migration: {name}")]
    UnknownMigration { name: String },

    /// P004: Applied state names a migration the catalog does not contain
    #[error("[P004] Applied migration '{name}' is not in the catalog")]
    InconsistentState { name: String },
}

/// Result type alias for PlanError
pub type PlanResult<T> = Result<T, PlanError>;
