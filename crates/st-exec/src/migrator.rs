//! Read state, resolve, run

use crate::confirm::Confirm;
use crate::error::ExecResult;
use crate::executor::{ApplyMode, Executor, RunReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use st_core::{backward_plan, forward_plan, BackwardPlan, Catalog, ForwardPlan};
use st_core::{MigrationName, StateEntry};
use st_db::Store;
use std::collections::HashMap;

/// Where one catalog migration stands
#[derive(Debug, Clone, Serialize)]
pub struct MigrationStatus {
    pub name: MigrationName,
    pub applied_at: Option<DateTime<Utc>>,
    pub applied_by: Option<String>,
}

impl MigrationStatus {
    pub fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }
}

/// Catalog migrations against the store's state
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    /// Every catalog migration, ascending
    pub migrations: Vec<MigrationStatus>,

    /// Applied entries with no catalog counterpart
    pub drift: Vec<StateEntry>,
}

impl Status {
    pub fn applied(&self) -> impl Iterator<Item = &MigrationStatus> {
        self.migrations.iter().filter(|m| m.is_applied())
    }

    pub fn pending(&self) -> impl Iterator<Item = &MigrationStatus> {
        self.migrations.iter().filter(|m| !m.is_applied())
    }

    /// True when everything is applied and nothing has drifted
    pub fn is_up_to_date(&self) -> bool {
        self.drift.is_empty() && self.pending().next().is_none()
    }
}

/// A catalog bound to the store it migrates
pub struct Migrator<'a, S: Store + ?Sized> {
    store: &'a S,
    catalog: &'a Catalog,
}

impl<'a, S: Store + ?Sized> Migrator<'a, S> {
    pub fn new(store: &'a S, catalog: &'a Catalog) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Resolve the forward plan against the store's current state
    pub fn plan_forward(&self, target: Option<&str>) -> ExecResult<ForwardPlan<'a>> {
        let state = self.store.current_state()?;
        Ok(forward_plan(self.catalog, &state, target)?)
    }

    /// Resolve the backward plan against the store's current state
    pub fn plan_backward(&self, target: &str) -> ExecResult<BackwardPlan<'a>> {
        let state = self.store.current_state()?;
        Ok(backward_plan(self.catalog, &state, target)?)
    }

    /// Apply pending migrations through `target` (or to the end)
    pub fn forward_to(
        &self,
        target: Option<&str>,
        mode: ApplyMode,
        confirm: Option<&mut dyn Confirm>,
    ) -> ExecResult<RunReport> {
        let plan = self.plan_forward(target)?;
        Executor::new(self.store).run_forward(&plan, mode, confirm)
    }

    /// Reverse applied migrations back through `target`, inclusive
    pub fn backward_to(
        &self,
        target: &str,
        confirm: Option<&mut dyn Confirm>,
    ) -> ExecResult<RunReport> {
        let plan = self.plan_backward(target)?;
        Executor::new(self.store).run_backward(&plan, confirm)
    }

    pub fn status(&self) -> ExecResult<Status> {
        let state = self.store.current_state()?;
        let mut applied: HashMap<&str, &StateEntry> =
            state.iter().map(|e| (e.name.as_str(), e)).collect();

        let migrations = self
            .catalog
            .ordered()
            .iter()
            .map(|m| {
                let entry = applied.remove(m.name.as_str());
                MigrationStatus {
                    name: m.name.clone(),
                    applied_at: entry.map(|e| e.applied_at),
                    applied_by: entry.and_then(|e| e.applied_by.clone()),
                }
            })
            .collect();

        let drift = state
            .iter()
            .filter(|e| applied.contains_key(e.name.as_str()))
            .cloned()
            .collect();

        Ok(Status { migrations, drift })
    }
}
