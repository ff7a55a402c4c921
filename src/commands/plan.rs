//! `ferry plan` — dry run: discover, resolve, and print the mapping table.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::application::services;
use crate::commands::DirectiveArgs;
use crate::domain::{Diagnostic, Machine, MappingTable};
use crate::infra::{DEFAULT_SSH_TIMEOUT, SsPortDiscovery, SshSession, TokioCommandRunner};
use crate::output::{OutputContext, TerminalReporter};

/// Arguments for the plan command.
#[derive(Args)]
pub struct PlanArgs {
    /// Source machine to inspect ([user@]hostname)
    pub source: String,

    #[command(flatten)]
    pub directives: DirectiveArgs,
}

/// JSON document printed by `ferry plan --json`.
#[derive(Serialize)]
struct PlanOutput<'a> {
    source: &'a str,
    mappings: &'a MappingTable,
    diagnostics: &'a [Diagnostic],
}

/// Entry point for `ferry plan`.
///
/// # Errors
///
/// Returns an error if input validation or discovery fails.
pub async fn run(ctx: &OutputContext, args: &PlanArgs, json: bool) -> Result<()> {
    let source = Machine::parse(&args.source)?;
    let directives = args.directives.directives()?;

    let ssh = SshSession::new(TokioCommandRunner::new(DEFAULT_SSH_TIMEOUT));
    let discovery = SsPortDiscovery::new(&ssh);
    let reporter = TerminalReporter::new(ctx);

    let resolution = services::plan::plan(&discovery, &reporter, &source, &directives).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&PlanOutput {
                source: source.name(),
                mappings: &resolution.table,
                diagnostics: &resolution.diagnostics,
            })?
        );
    } else {
        ctx.header(&format!("Port mappings for '{source}'"));
        print!("{}", render_table(&resolution.table));
    }
    Ok(())
}

/// Render the table as aligned text columns.
#[must_use]
pub fn render_table(table: &MappingTable) -> String {
    if table.is_empty() {
        return "  (no mappings)\n".to_string();
    }
    let mut out = format!("  {:<8} {:<8} {}\n", "SOURCE", "TARGET", "ORIGIN");
    for mapping in table {
        out.push_str(&format!(
            "  {:<8} {:<8} {}\n",
            mapping.source, mapping.target, mapping.origin
        ));
    }
    out
}
