//! Error types for st-exec

use st_core::{MigrationName, PlanError};
use st_db::DbError;
use thiserror::Error;

/// Plan execution errors
#[derive(Error, Debug)]
pub enum ExecError {
    /// The plan could not be resolved
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Reading state from the store failed
    #[error(transparent)]
    Store(#[from] DbError),

    /// A migration's statement failed; earlier migrations stay applied (X001)
    #[error("[X001] Migration '{migration}' failed: {source}")]
    StatementFailure {
        migration: MigrationName,
        #[source]
        source: DbError,
    },

    /// The caller declined the plan before anything ran (X002)
    #[error("[X002] Confirmation declined, no migrations were run")]
    ConfirmationDeclined,

    /// Reading or writing the confirmation prompt failed (X003)
    #[error("[X003] Confirmation prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Result type alias for ExecError
pub type ExecResult<T> = Result<T, ExecError>;
