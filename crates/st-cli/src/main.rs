//! Strata CLI - ordered, reversible SQL migrations for DuckDB

use anyhow::Result;
use clap::Parser;
use st_exec::ApplyMode;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::common::ExitCode;
use commands::{backward, forward, history, init, new, state, status};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init(args) => init::execute(args, &cli.global),
        Commands::New(args) => new::execute(args, &cli.global),
        Commands::Forward(args) => forward::execute(args, &cli.global, ApplyMode::Real),
        Commands::Fake(args) => forward::execute(args, &cli.global, ApplyMode::Fake),
        Commands::Backward(args) => backward::execute(args, &cli.global),
        Commands::State(args) => state::execute(args, &cli.global),
        Commands::Log(args) => history::execute(args, &cli.global),
        Commands::Status(args) => status::execute(args, &cli.global),
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match run(&cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            if let Some(code) = err.downcast_ref::<ExitCode>() {
                return std::process::ExitCode::from(code.0);
            }
            eprintln!("Error: {err:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
