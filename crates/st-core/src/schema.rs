//! Bookkeeping relations shared by generated stubs and the store
//!
//! The store has no triggers, so every state mutation is paired with its log
//! append by the SQL text itself. Stubs wrap the pair in one transaction.

use crate::records::LogOperation;

/// Current-state relation: one row per applied migration.
pub const STATE_TABLE: &str = "migration_state";

/// Append-only log relation: one row per state mutation.
pub const LOG_TABLE: &str = "migration_log";

/// Sequence feeding `migration_log.id`.
pub const LOG_SEQUENCE: &str = "migration_log_id_seq";

/// Session variable holding the acting user, read with `getvariable`.
pub const ACTOR_VARIABLE: &str = "strata_actor";

/// Escape a value for use inside a single-quoted SQL literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// DDL creating both relations and the log sequence.
pub fn bootstrap_sql() -> String {
    format!(
        "CREATE TABLE {STATE_TABLE} (
    name       VARCHAR PRIMARY KEY,
    applied_at TIMESTAMP NOT NULL DEFAULT now(),
    applied_by VARCHAR
);

CREATE SEQUENCE {LOG_SEQUENCE} START 1;

CREATE TABLE {LOG_TABLE} (
    id        BIGINT PRIMARY KEY DEFAULT nextval('{LOG_SEQUENCE}'),
    logged_at TIMESTAMP NOT NULL DEFAULT now(),
    name      VARCHAR NOT NULL,
    op        VARCHAR NOT NULL,
    actor     VARCHAR
);"
    )
}

fn log_append_sql(name: &str, op: LogOperation) -> String {
    format!(
        "INSERT INTO {LOG_TABLE} (name, op, actor) VALUES ({}, '{}', getvariable('{ACTOR_VARIABLE}'));",
        quote_literal(name),
        op.token()
    )
}

/// State insertion for `name` followed by its log append.
pub fn record_apply_sql(name: &str) -> String {
    format!(
        "INSERT INTO {STATE_TABLE} (name, applied_by) VALUES ({}, getvariable('{ACTOR_VARIABLE}'));\n{}",
        quote_literal(name),
        log_append_sql(name, LogOperation::Apply)
    )
}

/// State deletion for `name` followed by its log append.
pub fn record_reverse_sql(name: &str) -> String {
    format!(
        "DELETE FROM {STATE_TABLE} WHERE name = {};\n{}",
        quote_literal(name),
        log_append_sql(name, LogOperation::Reverse)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("alice"), "'alice'");
        assert_eq!(quote_literal("o'brien"), "'o''brien'");
    }

    #[test]
    fn test_record_apply_pairs_state_and_log() {
        let sql = record_apply_sql("00002_users");
        assert!(sql.contains("INSERT INTO migration_state (name, applied_by) VALUES ('00002_users'"));
        assert!(sql.contains("INSERT INTO migration_log (name, op, actor) VALUES ('00002_users', 'APPLY'"));
    }

    #[test]
    fn test_record_reverse_pairs_state_and_log() {
        let sql = record_reverse_sql("00002_users");
        assert!(sql.contains("DELETE FROM migration_state WHERE name = '00002_users';"));
        assert!(sql.contains("'00002_users', 'REVERSE'"));
    }
}
