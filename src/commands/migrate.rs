//! `ferry migrate` — discover, resolve, confirm, and install port forwarding.

use anyhow::{Context, Result};
use clap::Args;

use crate::application::services;
use crate::commands::DirectiveArgs;
use crate::commands::plan::render_table;
use crate::domain::Machine;
use crate::infra::{
    DEFAULT_SSH_TIMEOUT, IptablesForwardingSink, SsPortDiscovery, SshSession, StateManager,
    TokioCommandRunner,
};
use crate::output::{OutputContext, TerminalReporter};

/// Arguments for the migrate command.
#[derive(Args)]
pub struct MigrateArgs {
    /// Source machine whose service is being migrated ([user@]hostname)
    pub source: String,

    /// Target machine that will forward to the source
    #[arg(short = 't', long = "target", value_name = "MACHINE")]
    pub target: String,

    #[command(flatten)]
    pub directives: DirectiveArgs,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long, env = "FERRY_YES")]
    pub yes: bool,
}

/// Entry point for `ferry migrate`.
///
/// # Errors
///
/// Returns an error if validation, discovery, rule installation, or state
/// recording fails.
pub async fn run(ctx: &OutputContext, args: &MigrateArgs, json: bool) -> Result<()> {
    let source = Machine::parse(&args.source)?;
    let target = Machine::parse(&args.target)?;
    let directives = args.directives.directives()?;

    let ssh = SshSession::new(TokioCommandRunner::new(DEFAULT_SSH_TIMEOUT));
    let discovery = SsPortDiscovery::new(&ssh);
    let sink = IptablesForwardingSink::new(&ssh);
    let store = StateManager::new()?;
    let reporter = TerminalReporter::new(ctx);

    let resolution = services::plan::plan(&discovery, &reporter, &source, &directives).await?;

    if !json && !ctx.quiet {
        ctx.header(&format!("Port mappings for '{source}'"));
        print!("{}", render_table(&resolution.table));
    }

    if !json && !resolution.table.is_empty() && !confirmed(ctx, args, &target)? {
        ctx.info("Aborted.");
        return Ok(());
    }

    let record = services::migrate::apply(
        &sink,
        &store,
        &reporter,
        &source,
        &target,
        &resolution.table,
    )
    .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        ctx.success(&format!(
            "'{target}' now forwards {count} port(s) to '{source}'",
            count = record.mappings.len()
        ));
    }
    Ok(())
}

/// Ask before touching the target's firewall. `--yes`, `FERRY_YES`, `CI`, or
/// a non-interactive terminal all skip the prompt.
fn confirmed(ctx: &OutputContext, args: &MigrateArgs, target: &Machine) -> Result<bool> {
    if args.yes || !ctx.is_tty || std::env::var("CI").is_ok() {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(format!("Install these forwarding rules on '{target}'?"))
        .default(true)
        .interact()
        .context("reading confirmation")
}
