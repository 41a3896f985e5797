//! Plan execution

use crate::confirm::Confirm;
use crate::error::{ExecError, ExecResult};
use st_core::{BackwardPlan, Direction, ForwardPlan, Migration, MigrationName};
use st_db::{DbResult, Store};
use std::time::{Duration, Instant};

/// How forward migrations are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyMode {
    /// Run each migration's forward statements
    #[default]
    Real,
    /// Record each migration as applied without running anything
    Fake,
}

impl std::fmt::Display for ApplyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplyMode::Real => write!(f, "real"),
            ApplyMode::Fake => write!(f, "fake"),
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Which way the run moved
    pub direction: Direction,

    /// Apply mode (always `Real` for backward runs)
    pub mode: ApplyMode,

    /// Migrations completed, in execution order
    pub completed: Vec<MigrationName>,

    /// Total execution time
    pub duration: Duration,
}

impl RunReport {
    /// True when the plan was empty and nothing ran
    pub fn is_noop(&self) -> bool {
        self.completed.is_empty()
    }
}

/// Runs resolved plans against a store, one statement block at a time
pub struct Executor<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> Executor<'a, S> {
    /// Create a new executor
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Apply a forward plan in ascending order.
    ///
    /// Stops at the first failing statement. Migrations completed before it
    /// stay applied; nothing is rolled back on the caller's behalf.
    pub fn run_forward(
        &self,
        plan: &ForwardPlan<'_>,
        mode: ApplyMode,
        confirm: Option<&mut dyn Confirm>,
    ) -> ExecResult<RunReport> {
        self.run(ForwardPlan::DIRECTION, plan.steps(), mode, confirm)
    }

    /// Reverse a backward plan in its (descending) order.
    pub fn run_backward(
        &self,
        plan: &BackwardPlan<'_>,
        confirm: Option<&mut dyn Confirm>,
    ) -> ExecResult<RunReport> {
        self.run(BackwardPlan::DIRECTION, plan.steps(), ApplyMode::Real, confirm)
    }

    fn run(
        &self,
        direction: Direction,
        steps: &[&Migration],
        mode: ApplyMode,
        confirm: Option<&mut dyn Confirm>,
    ) -> ExecResult<RunReport> {
        let start = Instant::now();

        if steps.is_empty() {
            log::info!("{direction}: nothing to do");
            return Ok(RunReport {
                direction,
                mode,
                completed: Vec::new(),
                duration: start.elapsed(),
            });
        }

        if let Some(gate) = confirm {
            if !gate.confirm(direction, steps).map_err(ExecError::Prompt)? {
                log::info!("{direction}: declined, nothing was run");
                return Err(ExecError::ConfirmationDeclined);
            }
        }

        let mut completed = Vec::with_capacity(steps.len());
        for migration in steps {
            let step_start = Instant::now();
            self.step(direction, migration, mode)
                .map_err(|source| ExecError::StatementFailure {
                    migration: migration.name.clone(),
                    source,
                })?;
            log::info!(
                "{direction} {} ({mode}, {}ms)",
                migration.name,
                step_start.elapsed().as_millis()
            );
            completed.push(migration.name.clone());
        }

        Ok(RunReport {
            direction,
            mode,
            completed,
            duration: start.elapsed(),
        })
    }

    fn step(&self, direction: Direction, migration: &Migration, mode: ApplyMode) -> DbResult<()> {
        if mode == ApplyMode::Fake {
            log::debug!("Fake apply of {}", migration.name);
            return self.store.insert_state_row(migration.name.as_str());
        }

        let statements = migration.statements(direction);
        for (i, sql) in statements.iter().enumerate() {
            log::debug!(
                "{} statement {}/{} on {}",
                migration.name,
                i + 1,
                statements.len(),
                self.store.db_type()
            );
            self.store.execute_batch(sql)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
