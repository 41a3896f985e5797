//! DuckDB store implementation

use crate::error::{DbError, DbResult};
use crate::traits::Store;
use chrono::{DateTime, Utc};
use duckdb::{params, Connection};
use st_core::schema::{quote_literal, ACTOR_VARIABLE, LOG_TABLE, STATE_TABLE};
use st_core::{LogEntry, LogOperation, MigrationName, StateEntry};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB-backed migration store
pub struct DuckDbStore {
    conn: Mutex<Connection>,
    actor: Option<String>,
}

impl DuckDbStore {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self::from_connection(conn))
    }

    /// Open from a path string (handles the `:memory:` special case)
    pub fn open(path: &str) -> DbResult<Self> {
        if path.trim().is_empty() {
            return Err(DbError::ConnectionError(
                "empty database path provided".to_string(),
            ));
        }
        log::info!("Connecting to database '{}'", path);
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            actor: None,
        }
    }

    /// Record `actor` as the acting user for this session.
    ///
    /// Sets the `strata_actor` session variable that generated stubs read
    /// with `getvariable`, and stamps fake applies.
    pub fn with_actor(mut self, actor: &str) -> DbResult<Self> {
        self.execute_batch(&format!(
            "SET VARIABLE {ACTOR_VARIABLE} = {}",
            quote_literal(actor)
        ))?;
        self.actor = Some(actor.to_string());
        Ok(self)
    }

    /// The session actor, if one was set
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error.
    fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.lock()?;
        conn.execute_batch("BEGIN TRANSACTION")?;

        let result = body(&conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = conn.execute_batch("COMMIT") {
                    let _ = conn.execute_batch("ROLLBACK");
                    return Err(DbError::ExecutionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = conn.execute_batch("ROLLBACK");
            }
        }
        result
    }
}

fn malformed(relation: &str, message: impl Into<String>) -> DbError {
    DbError::MalformedRow {
        relation: relation.to_string(),
        message: message.into(),
    }
}

fn timestamp(relation: &str, millis: i64) -> DbResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| malformed(relation, format!("timestamp out of range: {millis}")))
}

fn migration_name(relation: &str, raw: String) -> DbResult<MigrationName> {
    MigrationName::try_new(raw).ok_or_else(|| malformed(relation, "empty migration name"))
}

impl Store for DuckDbStore {
    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let (schema, table) = name.rsplit_once('.').unwrap_or(("main", name));
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            params![schema, table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn current_state(&self) -> DbResult<Vec<StateEntry>> {
        if !self.relation_exists(STATE_TABLE)? {
            log::debug!("{} does not exist yet, reading as empty", STATE_TABLE);
            return Ok(Vec::new());
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT name, epoch_ms(applied_at), applied_by FROM {STATE_TABLE} ORDER BY name"
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(name, applied_at, applied_by)| {
                Ok(StateEntry {
                    name: migration_name(STATE_TABLE, name)?,
                    applied_at: timestamp(STATE_TABLE, applied_at)?,
                    applied_by,
                })
            })
            .collect()
    }

    fn history(&self) -> DbResult<Vec<LogEntry>> {
        if !self.relation_exists(LOG_TABLE)? {
            log::debug!("{} does not exist yet, reading as empty", LOG_TABLE);
            return Ok(Vec::new());
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name, op, epoch_ms(logged_at), actor FROM {LOG_TABLE} ORDER BY id"
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, op, logged_at, actor)| {
                Ok(LogEntry {
                    id,
                    name: migration_name(LOG_TABLE, name)?,
                    operation: op
                        .parse::<LogOperation>()
                        .map_err(|e| malformed(LOG_TABLE, e))?,
                    logged_at: timestamp(LOG_TABLE, logged_at)?,
                    actor,
                })
            })
            .collect()
    }

    fn insert_state_row(&self, name: &str) -> DbResult<()> {
        // No triggers in DuckDB: the log append shares the insert's transaction.
        self.transaction(|conn| {
            conn.execute(
                &format!("INSERT INTO {STATE_TABLE} (name, applied_by) VALUES (?, ?)"),
                params![name, self.actor],
            )?;
            conn.execute(
                &format!("INSERT INTO {LOG_TABLE} (name, op, actor) VALUES (?, ?, ?)"),
                params![name, LogOperation::Apply.token(), self.actor],
            )?;
            Ok(())
        })
    }

    fn reset_session(&self) -> DbResult<()> {
        match self.execute_batch("ROLLBACK") {
            Ok(()) => {
                log::debug!("Rolled back open transaction");
                Ok(())
            }
            Err(DbError::ExecutionError(msg)) if msg.contains("no transaction is active") => {
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_store_test.rs"]
mod tests;
