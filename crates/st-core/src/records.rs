//! Rows read back from the state and log relations

use crate::migration_name::MigrationName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One currently-applied migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    /// Migration name
    pub name: MigrationName,

    /// When the migration was applied
    pub applied_at: DateTime<Utc>,

    /// Who applied it, when the statements recorded it
    pub applied_by: Option<String>,
}

impl StateEntry {
    /// Entry with only a name, stamped with the current time.
    pub fn named(name: impl Into<MigrationName>) -> Self {
        Self {
            name: name.into(),
            applied_at: Utc::now(),
            applied_by: None,
        }
    }
}

/// Kind of state mutation a log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOperation {
    /// A state row was inserted
    Apply,
    /// A state row was deleted
    Reverse,
}

impl LogOperation {
    /// Token stored in the log relation's `op` column.
    pub fn token(self) -> &'static str {
        match self {
            LogOperation::Apply => "APPLY",
            LogOperation::Reverse => "REVERSE",
        }
    }
}

impl fmt::Display for LogOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for LogOperation {
    type Err = String;

    /// Accepts the stored tokens and the trigger-style `INSERT`/`DELETE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "APPLY" | "INSERT" => Ok(LogOperation::Apply),
            "REVERSE" | "DELETE" => Ok(LogOperation::Reverse),
            other => Err(format!("unknown log operation '{other}'")),
        }
    }
}

/// One append-only history row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Monotonic sequence id
    pub id: i64,

    /// Migration the mutation concerned
    pub name: MigrationName,

    /// Insert or delete
    pub operation: LogOperation,

    /// When the mutation happened
    pub logged_at: DateTime<Utc>,

    /// Who performed it, when recorded
    pub actor: Option<String>,
}
