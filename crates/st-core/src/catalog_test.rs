use super::*;

fn mig(name: &str) -> Migration {
    Migration::new(name, vec![format!("-- {name} forward")], vec![])
}

#[test]
fn test_new_sorts_by_name() {
    let catalog = Catalog::new(vec![
        mig("00003_three"),
        mig("00001_one"),
        mig("00002_two"),
    ])
    .unwrap();

    let names: Vec<&str> = catalog.ordered().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["00001_one", "00002_two", "00003_three"]);
}

#[test]
fn test_timestamp_names_sort_after_sequence_names() {
    let catalog = Catalog::new(vec![mig("20181106123456_baz"), mig("00005_sos")]).unwrap();
    assert_eq!(catalog.index_of("00005_sos"), Some(0));
    assert_eq!(catalog.index_of("20181106123456_baz"), Some(1));
}

#[test]
fn test_duplicate_names_are_rejected() {
    let err = Catalog::new(vec![mig("00001_one"), mig("00001_one")]).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateMigration { name } if name == "00001_one"));
}

#[test]
fn test_empty_name_is_rejected() {
    let blank = Migration {
        name: MigrationName::try_new("x").unwrap(),
        forward: vec![],
        backward: vec![],
    };
    let mut empty = blank.clone();
    empty.name = serde_json::from_str(r#""""#).unwrap();
    let err = Catalog::new(vec![blank, empty]).unwrap_err();
    assert!(matches!(err, CoreError::EmptyMigrationName));
}

#[test]
fn test_lookup_and_index_of() {
    let catalog = Catalog::new(vec![mig("00001_one"), mig("00002_two")]).unwrap();

    assert_eq!(catalog.lookup("00002_two").unwrap().name, "00002_two");
    assert!(catalog.lookup("00009_missing").is_none());
    assert_eq!(catalog.index_of("00001_one"), Some(0));
    assert_eq!(catalog.index_of("00009_missing"), None);
}

#[test]
fn test_empty_catalog() {
    let catalog = Catalog::new(vec![]).unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.len(), 0);
    assert!(catalog.latest().is_none());
}
