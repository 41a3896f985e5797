//! Forward and fake command implementation

use anyhow::Result;
use st_core::ForwardPlan;
use st_exec::{ApplyMode, Migrator};

use crate::cli::{ForwardArgs, GlobalArgs};
use crate::commands::common::{
    confirmation_gate, finish_run, load_project, print_plan, PromptSlot,
};

/// Execute the forward command, or the fake command when `mode` is `Fake`
pub(crate) fn execute(args: &ForwardArgs, global: &GlobalArgs, mode: ApplyMode) -> Result<()> {
    let project = load_project(global)?;
    let catalog = project.load_catalog()?;
    let store = project.open_store(global)?;
    let migrator = Migrator::new(&store, &catalog);
    let target = args.to.as_deref();

    if args.dry_run {
        let plan = migrator.plan_forward(target)?;
        print_plan(ForwardPlan::DIRECTION, plan.steps());
        return Ok(());
    }

    if mode == ApplyMode::Fake {
        println!("Fake mode: forward statements will not run.");
    }

    let mut slot: PromptSlot = None;
    let gate = confirmation_gate(project.should_confirm(args.yes), &mut slot);
    finish_run(migrator.forward_to(target, mode, gate))
}
