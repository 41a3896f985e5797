//! State command implementation

use anyhow::{Context, Result};
use st_db::Store;

use crate::cli::{GlobalArgs, ListArgs, OutputFormat};
use crate::commands::common::{format_timestamp, load_project, print_json, print_table};

/// Execute the state command
pub(crate) fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let store = project.open_store(global)?;
    let state = store
        .current_state()
        .context("Failed to read migration state")?;

    if args.output == OutputFormat::Json {
        return print_json(&state);
    }

    if state.is_empty() {
        println!("No migrations applied.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = state
        .iter()
        .map(|entry| {
            vec![
                entry.name.to_string(),
                format_timestamp(&entry.applied_at),
                entry.applied_by.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["NAME", "APPLIED_AT", "APPLIED_BY"], &rows);
    Ok(())
}
