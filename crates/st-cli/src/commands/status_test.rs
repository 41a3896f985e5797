use super::*;
use chrono::{TimeZone, Utc};
use st_core::MigrationName;

#[test]
fn test_pending_row() {
    let row = status_row(&MigrationStatus {
        name: MigrationName::new("00002_users"),
        applied_at: None,
        applied_by: None,
    });
    assert_eq!(row, vec!["00002_users", "pending", "", ""]);
}

#[test]
fn test_applied_row() {
    let row = status_row(&MigrationStatus {
        name: MigrationName::new("00001_init"),
        applied_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()),
        applied_by: Some("alice".to_string()),
    });
    assert_eq!(
        row,
        vec!["00001_init", "applied", "2024-03-01 09:30:00", "alice"]
    );
}
