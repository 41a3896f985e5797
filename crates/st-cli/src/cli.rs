//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Strata - ordered, reversible SQL migrations
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database path (`:memory:` for a throwaway database)
    #[arg(long, global = true, env = "STRATA_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the first migration, which creates the bookkeeping tables
    Init(InitArgs),

    /// Write an empty forward/backward migration pair
    New(NewArgs),

    /// Apply pending migrations
    Forward(ForwardArgs),

    /// Mark pending migrations as applied without running them
    Fake(ForwardArgs),

    /// Reverse applied migrations back through a target
    Backward(BackwardArgs),

    /// Show applied migrations
    State(ListArgs),

    /// Show the history of every apply and reverse
    Log(ListArgs),

    /// Show applied and pending migrations
    Status(ListArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Prefix with a UTC timestamp instead of a sequence number
    #[arg(long)]
    pub timestamp: bool,
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Label appended to the migration prefix
    pub label: String,

    /// Prefix with a UTC timestamp instead of a sequence number
    #[arg(long)]
    pub timestamp: bool,
}

/// Arguments for the forward and fake commands
#[derive(Args, Debug)]
pub struct ForwardArgs {
    /// Stop after this migration (default: the latest)
    #[arg(long)]
    pub to: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Print the plan without running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the backward command
#[derive(Args, Debug)]
pub struct BackwardArgs {
    /// Reverse back through this migration, inclusive
    #[arg(long)]
    pub to: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Print the plan without running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the state, log and status commands
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Output formats for listing commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// JSON document
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
