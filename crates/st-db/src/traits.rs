//! Store trait definition

use crate::error::DbResult;
use st_core::{LogEntry, StateEntry};

/// The relational store migrations run against.
///
/// Reads of the bookkeeping relations tolerate a brand-new store: a missing
/// relation reads as empty. There is no apply/reverse method:
/// state changes happen inside each migration's own statements.
pub trait Store: Send + Sync {
    /// Execute one statement block, which may hold several commands and its
    /// own transaction boundaries.
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists
    fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Applied migrations, ascending by name.
    fn current_state(&self) -> DbResult<Vec<StateEntry>>;

    /// Every recorded state mutation, ascending by sequence id.
    fn history(&self) -> DbResult<Vec<LogEntry>>;

    /// Insert `name` into the state relation, with its log entry, without
    /// running anything else. Used for fake applies.
    fn insert_state_row(&self, name: &str) -> DbResult<()>;

    /// Close a transaction left open by a failed statement block.
    ///
    /// Succeeds when no transaction is open.
    fn reset_session(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
