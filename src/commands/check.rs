//! `ferry check` — pre-migration connectivity diagnostics.

use anyhow::Result;
use clap::Args;

use crate::application::services::check::{CheckReport, MachineChecks, check};
use crate::domain::Machine;
use crate::infra::{DEFAULT_SSH_TIMEOUT, TokioCommandRunner, TokioNetworkProbe};
use crate::output::OutputContext;

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Source machine ([user@]hostname)
    pub source: String,

    /// Target machine
    #[arg(short = 't', long = "target", value_name = "MACHINE")]
    pub target: String,
}

/// Entry point for `ferry check`.
///
/// # Errors
///
/// Returns an error if validation fails or any check does not pass, so the
/// exit code is usable from scripts.
pub async fn run(ctx: &OutputContext, args: &CheckArgs, json: bool) -> Result<()> {
    let source = Machine::parse(&args.source)?;
    let target = Machine::parse(&args.target)?;

    let runner = TokioCommandRunner::new(DEFAULT_SSH_TIMEOUT);
    let report = check(&runner, &TokioNetworkProbe, &source, &target).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(ctx, &report);
    }

    let issues = report.issues();
    if !issues.is_empty() {
        anyhow::bail!("{count} check(s) failed", count = issues.len());
    }
    Ok(())
}

fn render_report(ctx: &OutputContext, report: &CheckReport) {
    ctx.header("Prerequisites");
    mark(ctx, report.ssh_client_found, "ssh client on PATH");

    for checks in [&report.source, &report.target] {
        ctx.header(&format!("Machine '{}'", checks.name));
        render_machine(ctx, checks);
    }

    for issue in report.issues() {
        ctx.warn(&issue);
    }
}

fn render_machine(ctx: &OutputContext, checks: &MachineChecks) {
    mark(ctx, checks.dns_ok, "hostname resolves");
    mark(ctx, checks.ssh_ok, "SSH port reachable");
}

fn mark(ctx: &OutputContext, ok: bool, label: &str) {
    if ok {
        ctx.success(label);
    } else {
        ctx.error(label);
    }
}
