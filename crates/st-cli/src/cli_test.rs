use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_forward_defaults() {
    let cli = Cli::try_parse_from(["strata", "forward"]).unwrap();
    match cli.command {
        Commands::Forward(args) => {
            assert!(args.to.is_none());
            assert!(!args.yes);
            assert!(!args.dry_run);
        }
        other => panic!("unexpected command {other:?}"),
    }
    assert_eq!(cli.global.project_dir, ".");
}

#[test]
fn test_backward_requires_target() {
    assert!(Cli::try_parse_from(["strata", "backward"]).is_err());
    let cli = Cli::try_parse_from(["strata", "backward", "--to", "00002_users", "-y"]).unwrap();
    match cli.command {
        Commands::Backward(args) => {
            assert_eq!(args.to, "00002_users");
            assert!(args.yes);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "strata",
        "status",
        "--output",
        "json",
        "-p",
        "/srv/app",
        "--database",
        ":memory:",
        "-v",
    ])
    .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "/srv/app");
    assert_eq!(cli.global.database.as_deref(), Some(":memory:"));
    match cli.command {
        Commands::Status(args) => assert_eq!(args.output, OutputFormat::Json),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_new_takes_label() {
    let cli = Cli::try_parse_from(["strata", "new", "add_users", "--timestamp"]).unwrap();
    match cli.command {
        Commands::New(args) => {
            assert_eq!(args.label, "add_users");
            assert!(args.timestamp);
        }
        other => panic!("unexpected command {other:?}"),
    }
}
