//! Log command implementation

use anyhow::{Context, Result};
use st_db::Store;

use crate::cli::{GlobalArgs, ListArgs, OutputFormat};
use crate::commands::common::{format_timestamp, load_project, print_json, print_table};

/// Execute the log command
pub(crate) fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let store = project.open_store(global)?;
    let history = store.history().context("Failed to read migration log")?;

    if args.output == OutputFormat::Json {
        return print_json(&history);
    }

    if history.is_empty() {
        println!("No migration history.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = history
        .iter()
        .map(|entry| {
            vec![
                entry.id.to_string(),
                entry.name.to_string(),
                entry.operation.to_string(),
                format_timestamp(&entry.logged_at),
                entry.actor.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "OP", "LOGGED_AT", "ACTOR"], &rows);
    Ok(())
}
