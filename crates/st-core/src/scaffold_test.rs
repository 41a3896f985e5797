use super::*;
use crate::loader::load_catalog;
use chrono::TimeZone;

fn read(path: PathBuf) -> String {
    fs::read_to_string(path).unwrap()
}

fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 11, 6, 12, 34, 56).unwrap()
}

#[test]
fn test_write_init_migration() {
    let dir = tempfile::tempdir().unwrap();
    let folder = init_migration(dir.path()).unwrap();
    assert_eq!(folder, dir.path().join("00001_init"));

    let forward = read(folder.join("forward.sql"));
    assert!(forward.contains("CREATE TABLE migration_state"));
    assert!(forward.contains("CREATE TABLE migration_log"));
    assert!(forward.contains("INSERT INTO migration_state (name, applied_by) VALUES ('00001_init'"));

    let backward = read(folder.join("backward.sql"));
    assert!(backward.contains("Will not roll back 00001_init."));
}

#[test]
fn test_write_init_migration_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let folder = init_migration_timestamp(dir.path(), ts()).unwrap();
    assert_eq!(folder, dir.path().join("20181106123456_init"));

    let forward = read(folder.join("forward.sql"));
    assert!(forward.contains("VALUES ('20181106123456_init'"));
    let backward = read(folder.join("backward.sql"));
    assert!(backward.contains("Will not roll back 20181106123456_init."));
}

#[test]
fn test_write_new_migration() {
    let dir = tempfile::tempdir().unwrap();
    let folder = new_migration(dir.path(), "foo").unwrap();
    assert_eq!(folder, dir.path().join("00001_foo"));

    let forward = read(folder.join("forward.sql"));
    assert!(forward.contains("INSERT INTO migration_state (name, applied_by) VALUES ('00001_foo'"));
    assert!(forward.contains("'00001_foo', 'APPLY'"));

    let backward = read(folder.join("backward.sql"));
    assert!(backward.contains("DELETE FROM migration_state WHERE name = '00001_foo';"));
    assert!(backward.contains("'00001_foo', 'REVERSE'"));
}

#[test]
fn test_auto_number() {
    let dir = tempfile::tempdir().unwrap();
    init_migration(dir.path()).unwrap();
    new_migration(dir.path(), "foo").unwrap();
    let folder = new_migration(dir.path(), "bar").unwrap();
    assert_eq!(folder, dir.path().join("00003_bar"));
}

#[test]
fn test_new_migration_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let folder = new_migration_timestamp(dir.path(), "foo", ts()).unwrap();
    assert_eq!(folder, dir.path().join("20181106123456_foo"));
    let backward = read(folder.join("backward.sql"));
    assert!(backward.contains("WHERE name = '20181106123456_foo';"));
}

#[test]
fn test_existing_migration_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    init_migration(dir.path()).unwrap();
    let err = init_migration(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::MigrationExists { .. }));
}

#[test]
fn test_invalid_label_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = new_migration(dir.path(), "../oops").unwrap_err();
    assert!(matches!(err, CoreError::InvalidLabel { .. }));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_scaffolded_migrations_load_back() {
    let dir = tempfile::tempdir().unwrap();
    init_migration(dir.path()).unwrap();
    new_migration(dir.path(), "add_users").unwrap();

    let catalog = load_catalog(&DirSource::new(dir.path())).unwrap();
    let names: Vec<&str> = catalog.ordered().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["00001_init", "00002_add_users"]);
    assert_eq!(catalog.lookup("00002_add_users").unwrap().forward.len(), 1);
}
