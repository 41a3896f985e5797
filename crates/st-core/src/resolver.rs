//! Plan resolution: which migrations to run, in which order
//!
//! Both entry points are pure. They take the catalog, a snapshot of the
//! applied state, and a target, and return borrowed views into the catalog.

use crate::catalog::Catalog;
use crate::error::{PlanError, PlanResult};
use crate::migration::{Direction, Migration};
use crate::records::StateEntry;

/// Define an ordered plan type holding borrowed catalog entries.
macro_rules! define_plan {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident => $direction:expr;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        $vis struct $Name<'a> {
            steps: Vec<&'a Migration>,
        }

        impl<'a> $Name<'a> {
            /// Which way the plan moves.
            pub const DIRECTION: Direction = $direction;

            /// Migrations in execution order.
            pub fn steps(&self) -> &[&'a Migration] {
                &self.steps
            }

            /// Names in execution order.
            pub fn names(&self) -> Vec<&'a str> {
                self.steps.iter().map(|m| m.name.as_str()).collect()
            }

            pub fn len(&self) -> usize {
                self.steps.len()
            }

            pub fn is_empty(&self) -> bool {
                self.steps.is_empty()
            }
        }
    };
}

define_plan! {
    /// Pending migrations to apply, ascending.
    pub struct ForwardPlan => Direction::Forward;
}

define_plan! {
    /// Applied migrations to reverse, descending.
    pub struct BackwardPlan => Direction::Backward;
}

/// Resolve the migrations to apply after the last applied entry, up to and
/// including `target` (or the end of the catalog when `target` is unset).
///
/// An already-satisfied target yields an empty plan. An empty-string target
/// counts as unset.
pub fn forward_plan<'a>(
    catalog: &'a Catalog,
    state: &[StateEntry],
    target: Option<&str>,
) -> PlanResult<ForwardPlan<'a>> {
    if catalog.is_empty() {
        return Err(PlanError::EmptyCatalog);
    }

    let target_idx = match target.filter(|t| !t.is_empty()) {
        Some(name) => catalog
            .index_of(name)
            .ok_or_else(|| PlanError::UnknownMigration {
                name: name.to_string(),
            })?,
        None => catalog.len() - 1,
    };

    let start = match state.last() {
        Some(last) => {
            catalog
                .index_of(&last.name)
                .ok_or_else(|| PlanError::InconsistentState {
                    name: last.name.to_string(),
                })?
                + 1
        }
        None => 0,
    };

    if target_idx < start {
        log::debug!("forward target already satisfied");
        return Ok(ForwardPlan::default());
    }

    Ok(ForwardPlan {
        steps: catalog.ordered()[start..=target_idx].iter().collect(),
    })
}

/// Resolve the applied migrations to reverse, from the most recent back
/// through and including `target`.
///
/// `target` must already be applied.
pub fn backward_plan<'a>(
    catalog: &'a Catalog,
    state: &[StateEntry],
    target: &str,
) -> PlanResult<BackwardPlan<'a>> {
    if catalog.is_empty() {
        return Err(PlanError::EmptyCatalog);
    }
    if state.is_empty() {
        return Err(PlanError::EmptyState);
    }

    let from = state
        .iter()
        .rposition(|entry| entry.name == target)
        .ok_or_else(|| PlanError::UnknownMigration {
            name: target.to_string(),
        })?;

    let steps = state[from..]
        .iter()
        .rev()
        .map(|entry| {
            catalog
                .lookup(&entry.name)
                .ok_or_else(|| PlanError::InconsistentState {
                    name: entry.name.to_string(),
                })
        })
        .collect::<PlanResult<Vec<_>>>()?;

    Ok(BackwardPlan { steps })
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
