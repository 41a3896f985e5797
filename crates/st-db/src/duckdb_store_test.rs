use super::*;
use st_core::schema::{bootstrap_sql, record_apply_sql, record_reverse_sql};

fn bootstrapped() -> DuckDbStore {
    let db = DuckDbStore::in_memory().unwrap();
    db.execute_batch(&bootstrap_sql()).unwrap();
    db
}

fn apply(db: &DuckDbStore, name: &str) {
    db.execute_batch(&format!(
        "BEGIN TRANSACTION; {} COMMIT;",
        record_apply_sql(name)
    ))
    .unwrap();
}

fn reverse(db: &DuckDbStore, name: &str) {
    db.execute_batch(&format!(
        "BEGIN TRANSACTION; {} COMMIT;",
        record_reverse_sql(name)
    ))
    .unwrap();
}

fn state_names(db: &DuckDbStore) -> Vec<String> {
    db.current_state()
        .unwrap()
        .into_iter()
        .map(|e| e.name.into_inner())
        .collect()
}

#[test]
fn test_in_memory() {
    let db = DuckDbStore::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
    assert!(db.actor().is_none());
}

#[test]
fn test_open_empty_path_is_rejected() {
    let err = DuckDbStore::open("  ").err().unwrap();
    assert!(matches!(err, DbError::ConnectionError(_)));
}

#[test]
fn test_open_memory() {
    let db = DuckDbStore::open(":memory:").unwrap();
    assert!(!db.relation_exists(STATE_TABLE).unwrap());
}

#[test]
fn test_open_file_persists_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strata.duckdb");
    let path_str = path.display().to_string();
    {
        let db = DuckDbStore::open(&path_str).unwrap();
        db.execute_batch(&bootstrap_sql()).unwrap();
        apply(&db, "00001_init");
    }
    assert!(path.exists());

    let db = DuckDbStore::open(&path_str).unwrap();
    assert_eq!(state_names(&db), vec!["00001_init"]);
}

#[test]
fn test_fresh_store_reads_empty() {
    let db = DuckDbStore::in_memory().unwrap();
    assert!(db.current_state().unwrap().is_empty());
    assert!(db.history().unwrap().is_empty());
}

#[test]
fn test_relation_exists_with_schema() {
    let db = bootstrapped();
    assert!(db.relation_exists("migration_state").unwrap());
    assert!(db.relation_exists("main.migration_log").unwrap());
    assert!(!db.relation_exists("other.migration_log").unwrap());
    assert!(!db.relation_exists("nonexistent").unwrap());
}

#[test]
fn test_state_is_sorted_by_name() {
    let db = bootstrapped();
    apply(&db, "00002_users");
    apply(&db, "00001_init");
    apply(&db, "00003_orders");
    assert_eq!(
        state_names(&db),
        vec!["00001_init", "00002_users", "00003_orders"]
    );
}

#[test]
fn test_history_records_every_mutation_in_order() {
    let db = bootstrapped();
    apply(&db, "00001_init");
    apply(&db, "00002_users");
    reverse(&db, "00002_users");
    apply(&db, "00002_users");

    let history = db.history().unwrap();
    let ops: Vec<(&str, LogOperation)> = history
        .iter()
        .map(|e| (e.name.as_str(), e.operation))
        .collect();
    assert_eq!(
        ops,
        vec![
            ("00001_init", LogOperation::Apply),
            ("00002_users", LogOperation::Apply),
            ("00002_users", LogOperation::Reverse),
            ("00002_users", LogOperation::Apply),
        ]
    );
    assert!(history.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(state_names(&db), vec!["00001_init", "00002_users"]);
}

#[test]
fn test_actor_is_recorded_by_statements() {
    let db = bootstrapped().with_actor("alice").unwrap();
    assert_eq!(db.actor(), Some("alice"));
    apply(&db, "00001_init");

    let state = db.current_state().unwrap();
    assert_eq!(state[0].applied_by.as_deref(), Some("alice"));
    let history = db.history().unwrap();
    assert_eq!(history[0].actor.as_deref(), Some("alice"));
}

#[test]
fn test_actor_is_quoted() {
    let db = bootstrapped().with_actor("o'brien").unwrap();
    apply(&db, "00001_init");
    assert_eq!(
        db.current_state().unwrap()[0].applied_by.as_deref(),
        Some("o'brien")
    );
}

#[test]
fn test_insert_state_row_logs_apply() {
    let db = bootstrapped().with_actor("bob").unwrap();
    db.insert_state_row("00001_init").unwrap();

    let state = db.current_state().unwrap();
    assert_eq!(state.len(), 1);
    assert_eq!(state[0].name, "00001_init");
    assert_eq!(state[0].applied_by.as_deref(), Some("bob"));

    let history = db.history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].operation, LogOperation::Apply);
    assert_eq!(history[0].actor.as_deref(), Some("bob"));
}

#[test]
fn test_insert_state_row_duplicate_leaves_log_untouched() {
    let db = bootstrapped();
    db.insert_state_row("00001_init").unwrap();
    assert!(db.insert_state_row("00001_init").is_err());

    assert_eq!(db.current_state().unwrap().len(), 1);
    assert_eq!(db.history().unwrap().len(), 1);
}

#[test]
fn test_insert_state_row_without_bootstrap_fails() {
    let db = DuckDbStore::in_memory().unwrap();
    let err = db.insert_state_row("00001_init").unwrap_err();
    assert!(matches!(err, DbError::TableNotFound(_)));
}

#[test]
fn test_reset_session_without_transaction() {
    let db = DuckDbStore::in_memory().unwrap();
    db.reset_session().unwrap();
    db.reset_session().unwrap();
}

#[test]
fn test_reset_session_after_failed_block() {
    let db = bootstrapped();
    apply(&db, "00001_init");

    let failed = db.execute_batch(&format!(
        "BEGIN TRANSACTION; {} SELECT error('boom'); COMMIT;",
        record_apply_sql("00002_users")
    ));
    assert!(failed.is_err());

    db.reset_session().unwrap();
    assert_eq!(state_names(&db), vec!["00001_init"]);
    assert_eq!(db.history().unwrap().len(), 1);
}

#[test]
fn test_unknown_log_operation_is_malformed() {
    let db = bootstrapped();
    db.execute_batch("INSERT INTO migration_log (name, op) VALUES ('00001_init', 'UPSERT')")
        .unwrap();
    let err = db.history().unwrap_err();
    assert!(matches!(err, DbError::MalformedRow { .. }));
}

#[test]
fn test_trigger_style_tokens_are_accepted() {
    let db = bootstrapped();
    db.execute_batch(
        "INSERT INTO migration_log (name, op) VALUES ('00001_init', 'INSERT');
         INSERT INTO migration_log (name, op) VALUES ('00001_init', 'DELETE');",
    )
    .unwrap();
    let ops: Vec<LogOperation> = db.history().unwrap().iter().map(|e| e.operation).collect();
    assert_eq!(ops, vec![LogOperation::Apply, LogOperation::Reverse]);
}
