//! Init command implementation - writes the bookkeeping migration

use anyhow::{Context, Result};
use chrono::Utc;
use st_core::scaffold::{init_migration, init_migration_timestamp};
use st_core::NamingScheme;

use crate::cli::{GlobalArgs, InitArgs};
use crate::commands::common::load_project;

/// Execute the init command
pub(crate) fn execute(args: &InitArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let dir = project.migrations_dir();

    let folder = if args.timestamp || project.config.naming == NamingScheme::Timestamp {
        init_migration_timestamp(&dir, Utc::now())
    } else {
        init_migration(&dir)
    }
    .context("Failed to write init migration")?;

    println!("Created {}", folder.display());
    println!("\nNext steps:");
    println!("  strata forward     # create the migration_state and migration_log tables");
    println!("  strata new <label> # write your first schema change");
    Ok(())
}
