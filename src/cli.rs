//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::infra::StateManager;
use crate::output::OutputContext;

/// Migrate a service between machines, ports included
#[derive(Parser)]
#[command(
    name = "ferry",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Migrate a service: discover ports and install forwarding
    Migrate(commands::migrate::MigrateArgs),

    /// Show the mapping table a migrate would install (dry run)
    Plan(commands::plan::PlanArgs),

    /// Show the last recorded migration
    Status,

    /// Diagnose machine connectivity before migrating
    Check(commands::check::CheckArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            no_color,
            quiet,
            json,
            command,
        } = self;
        // JSON mode implies quiet human output; the JSON document is the output.
        let ctx = OutputContext::new(no_color, quiet || json);
        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
            Command::Migrate(args) => commands::migrate::run(&ctx, &args, json).await,
            Command::Plan(args) => commands::plan::run(&ctx, &args, json).await,
            Command::Status => {
                let store = StateManager::new()?;
                commands::status::run(&ctx, &store, json)
            }
            Command::Check(args) => commands::check::run(&ctx, &args, json).await,
        }
    }
}
