//! Backward command implementation

use anyhow::Result;
use st_core::BackwardPlan;
use st_exec::Migrator;

use crate::cli::{BackwardArgs, GlobalArgs};
use crate::commands::common::{
    confirmation_gate, finish_run, load_project, print_plan, PromptSlot,
};

/// Execute the backward command
pub(crate) fn execute(args: &BackwardArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let catalog = project.load_catalog()?;
    let store = project.open_store(global)?;
    let migrator = Migrator::new(&store, &catalog);

    if args.dry_run {
        let plan = migrator.plan_backward(&args.to)?;
        print_plan(BackwardPlan::DIRECTION, plan.steps());
        return Ok(());
    }

    let mut slot: PromptSlot = None;
    let gate = confirmation_gate(project.should_confirm(args.yes), &mut slot);
    finish_run(migrator.backward_to(&args.to, gate))
}
