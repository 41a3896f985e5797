//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use st_core::{load_catalog, Catalog, Config, Direction, DirSource, Migration};
use st_db::DuckDbStore;
use st_exec::{Confirm, ExecError, ExecResult, PromptConfirm, RunReport};
use std::fmt;
use std::io::{Stdout, StdinLock};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and the store is closed properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; nothing should reach stderr from here.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// A project directory with its resolved configuration
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

impl Project {
    pub(crate) fn migrations_dir(&self) -> PathBuf {
        self.config.migrations_dir_absolute(&self.root)
    }

    /// `--database` wins over `database.path` in strata.yml
    pub(crate) fn database_path(&self, global: &GlobalArgs) -> String {
        match &global.database {
            Some(path) => path.clone(),
            None => self.config.database_path(&self.root),
        }
    }

    pub(crate) fn load_catalog(&self) -> Result<Catalog> {
        let dir = self.migrations_dir();
        load_catalog(&DirSource::new(&dir))
            .with_context(|| format!("Failed to load migrations from {}", dir.display()))
    }

    /// Open the store and stamp the session with the configured actor
    pub(crate) fn open_store(&self, global: &GlobalArgs) -> Result<DuckDbStore> {
        let path = self.database_path(global);
        let actor = self.config.resolved_actor();
        log::debug!("Acting as '{}'", actor);
        DuckDbStore::open(&path)
            .and_then(|store| store.with_actor(&actor))
            .with_context(|| format!("Failed to open database: {path}"))
    }

    /// Whether to prompt before running a plan
    pub(crate) fn should_confirm(&self, yes: bool) -> bool {
        self.config.confirm && !yes
    }
}

/// Load strata.yml from `--config`, or from the project directory.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load configuration")?;
    Ok(Project { root, config })
}

/// Slot for a stdin prompt that is only opened when asked for.
pub(crate) type PromptSlot = Option<PromptConfirm<StdinLock<'static>, Stdout>>;

/// Confirmation gate for a run, or `None` when prompting is disabled.
pub(crate) fn confirmation_gate(
    enabled: bool,
    slot: &mut PromptSlot,
) -> Option<&mut dyn Confirm> {
    if !enabled {
        return None;
    }
    let prompt = slot.insert(PromptConfirm::stdio());
    Some(prompt as &mut dyn Confirm)
}

/// Print a resolved plan for `--dry-run`.
pub(crate) fn print_plan(direction: Direction, steps: &[&Migration]) {
    if steps.is_empty() {
        println!("Nothing to do.");
        return;
    }
    println!("{direction} plan ({} migrations):", steps.len());
    for migration in steps {
        println!("  {}", migration.name);
    }
}

/// Report the outcome of a run.
///
/// A declined confirmation exits with status 1 without an error message.
pub(crate) fn finish_run(result: ExecResult<RunReport>) -> Result<()> {
    match result {
        Ok(report) if report.is_noop() => {
            println!("Nothing to do.");
            Ok(())
        }
        Ok(report) => {
            for name in &report.completed {
                println!("  {} {}", report.direction, name);
            }
            println!(
                "\n{} migration{} completed in {}ms",
                report.completed.len(),
                if report.completed.len() == 1 { "" } else { "s" },
                report.duration.as_millis()
            );
            Ok(())
        }
        Err(ExecError::ConfirmationDeclined) => {
            println!("Cancelled, no migrations were run.");
            Err(ExitCode(1).into())
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Calculate column widths for a table given headers and rows.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a formatted table to stdout.
///
/// A left-aligned header row, a line of dashes, then each data row.
/// Columns are separated by two spaces.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  ").trim_end());

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  ").trim_end());
    }
}

/// Print `value` as pretty JSON.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
