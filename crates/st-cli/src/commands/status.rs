//! Status command implementation

use anyhow::Result;
use st_exec::{MigrationStatus, Migrator};

use crate::cli::{GlobalArgs, ListArgs, OutputFormat};
use crate::commands::common::{format_timestamp, load_project, print_json, print_table};

fn status_row(migration: &MigrationStatus) -> Vec<String> {
    vec![
        migration.name.to_string(),
        if migration.is_applied() {
            "applied".to_string()
        } else {
            "pending".to_string()
        },
        migration
            .applied_at
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default(),
        migration.applied_by.clone().unwrap_or_default(),
    ]
}

/// Execute the status command
pub(crate) fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let catalog = project.load_catalog()?;
    let store = project.open_store(global)?;
    let status = Migrator::new(&store, &catalog).status()?;

    if args.output == OutputFormat::Json {
        return print_json(&status);
    }

    if status.migrations.is_empty() {
        println!("No migrations found in {}", project.migrations_dir().display());
    } else {
        let rows: Vec<Vec<String>> = status.migrations.iter().map(status_row).collect();
        print_table(&["NAME", "STATUS", "APPLIED_AT", "APPLIED_BY"], &rows);
    }

    if !status.drift.is_empty() {
        println!("\nApplied but missing from {}:", project.migrations_dir().display());
        for entry in &status.drift {
            println!("  {}", entry.name);
        }
    }

    let pending = status.pending().count();
    println!();
    if status.is_up_to_date() {
        println!("Up to date.");
    } else if pending > 0 {
        println!(
            "{} pending migration{}",
            pending,
            if pending == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
