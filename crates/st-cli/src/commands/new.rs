//! New command implementation - writes an empty migration pair

use anyhow::{Context, Result};
use chrono::Utc;
use st_core::scaffold::{new_migration, new_migration_timestamp};
use st_core::NamingScheme;

use crate::cli::{GlobalArgs, NewArgs};
use crate::commands::common::load_project;

/// Execute the new command
pub(crate) fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let dir = project.migrations_dir();

    let folder = if args.timestamp || project.config.naming == NamingScheme::Timestamp {
        new_migration_timestamp(&dir, &args.label, Utc::now())
    } else {
        new_migration(&dir, &args.label)
    }
    .with_context(|| format!("Failed to write migration '{}'", args.label))?;

    println!("Created {}", folder.display());
    println!("  {}", folder.join("forward.sql").display());
    println!("  {}", folder.join("backward.sql").display());
    Ok(())
}
