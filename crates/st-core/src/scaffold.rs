//! Writing new migration stubs to disk

use crate::error::{CoreError, CoreResult};
use crate::loader::{migration_dirs, DirSource};
use crate::naming::{latest_sequence, sequence_name, timestamp_name, validate_label};
use crate::schema::{bootstrap_sql, record_apply_sql, record_reverse_sql, LOG_TABLE, STATE_TABLE};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Label used for the migration that creates the bookkeeping relations.
pub const INIT_LABEL: &str = "init";

fn init_forward(name: &str) -> String {
    format!(
        "-- {name}: create the {STATE_TABLE} and {LOG_TABLE} relations.
BEGIN TRANSACTION;

{bootstrap}

{record}

COMMIT;
",
        bootstrap = bootstrap_sql(),
        record = record_apply_sql(name),
    )
}

/// Refuses to run, so a reversal can never drop the bookkeeping relations.
fn init_backward(name: &str) -> String {
    format!(
        "SELECT error('Will not roll back {name}. You must manually drop the {STATE_TABLE} and {LOG_TABLE} tables.');
"
    )
}

fn stub_forward(name: &str) -> String {
    format!(
        "-- {name}: forward
BEGIN TRANSACTION;

-- Your forward SQL goes here.

{record}

COMMIT;
",
        record = record_apply_sql(name),
    )
}

fn stub_backward(name: &str) -> String {
    format!(
        "-- {name}: backward
BEGIN TRANSACTION;

-- Your backward SQL goes here.

{record}

COMMIT;
",
        record = record_reverse_sql(name),
    )
}

/// Create `dir/name/` holding `forward.sql` and `backward.sql`.
fn write_stubs(dir: &Path, name: &str, forward: &str, backward: &str) -> CoreResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    let folder = dir.join(name);
    if folder.exists() {
        return Err(CoreError::MigrationExists {
            path: folder.display().to_string(),
        });
    }
    fs::create_dir(&folder).map_err(|e| CoreError::IoWithPath {
        path: folder.display().to_string(),
        source: e,
    })?;

    for (file, content) in [("forward.sql", forward), ("backward.sql", backward)] {
        let path = folder.join(file);
        fs::write(&path, content).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
    }

    log::info!("Migration stubs written to {}", folder.display());
    Ok(folder)
}

/// Write `00001_init`, which creates the state and log relations.
pub fn init_migration(dir: &Path) -> CoreResult<PathBuf> {
    let name = sequence_name(1, INIT_LABEL);
    write_stubs(dir, &name, &init_forward(&name), &init_backward(&name))
}

/// Write `<timestamp>_init`, which creates the state and log relations.
pub fn init_migration_timestamp(dir: &Path, timestamp: DateTime<Utc>) -> CoreResult<PathBuf> {
    let name = timestamp_name(timestamp, INIT_LABEL);
    write_stubs(dir, &name, &init_forward(&name), &init_backward(&name))
}

/// Write a stub pair numbered one past the latest existing migration.
pub fn new_migration(dir: &Path, label: &str) -> CoreResult<PathBuf> {
    validate_label(label)?;
    let existing = if dir.exists() {
        migration_dirs(&DirSource::new(dir))?
    } else {
        Vec::new()
    };
    let name = sequence_name(latest_sequence(&existing)? + 1, label);
    write_stubs(dir, &name, &stub_forward(&name), &stub_backward(&name))
}

/// Write a stub pair prefixed with `timestamp`.
pub fn new_migration_timestamp(
    dir: &Path,
    label: &str,
    timestamp: DateTime<Utc>,
) -> CoreResult<PathBuf> {
    validate_label(label)?;
    let name = timestamp_name(timestamp, label);
    write_stubs(dir, &name, &stub_forward(&name), &stub_backward(&name))
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
