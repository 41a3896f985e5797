use super::*;
use st_core::NamingScheme;

fn global(project_dir: &str) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.to_string(),
        config: None,
        database: None,
    }
}

#[test]
fn test_column_widths_fit_longest_cell() {
    let widths = calculate_column_widths(
        &["NAME", "BY"],
        &[
            vec!["00001_init".to_string(), "a".to_string()],
            vec!["00002_x".to_string(), "deploy-bot".to_string()],
        ],
    );
    assert_eq!(widths, vec![10, 10]);
}

#[test]
fn test_load_project_without_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let project = load_project(&global(&dir.path().display().to_string())).unwrap();
    assert_eq!(project.migrations_dir(), dir.path().join("migrations"));
    assert!(project.should_confirm(false));
    assert!(!project.should_confirm(true));
}

#[test]
fn test_load_project_reads_strata_yml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("strata.yml"),
        "migrations_dir: sql\nconfirm: false\nnaming: timestamp\n",
    )
    .unwrap();
    let project = load_project(&global(&dir.path().display().to_string())).unwrap();
    assert_eq!(project.migrations_dir(), dir.path().join("sql"));
    assert_eq!(project.config.naming, NamingScheme::Timestamp);
    assert!(!project.should_confirm(false));
}

#[test]
fn test_explicit_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = global(&dir.path().display().to_string());
    args.config = Some(dir.path().join("nope.yml").display().to_string());
    assert!(load_project(&args).is_err());
}

#[test]
fn test_database_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = global(&dir.path().display().to_string());
    let project = load_project(&args).unwrap();
    assert_eq!(
        project.database_path(&args),
        dir.path().join("strata.duckdb").display().to_string()
    );

    args.database = Some(":memory:".to_string());
    assert_eq!(project.database_path(&args), ":memory:");
    let store = project.open_store(&args).unwrap();
    assert!(store.actor().is_some());
}

#[test]
fn test_gate_is_skipped_when_disabled() {
    let mut slot: PromptSlot = None;
    assert!(confirmation_gate(false, &mut slot).is_none());
    assert!(slot.is_none());
}

#[test]
fn test_declined_run_exits_quietly() {
    let err = finish_run(Err(ExecError::ConfirmationDeclined)).unwrap_err();
    let code = err.downcast_ref::<ExitCode>().unwrap();
    assert_eq!(code.0, 1);
    assert_eq!(err.to_string(), "");
}
