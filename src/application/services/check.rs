//! Check service — pre-migration connectivity diagnostics.
//!
//! Verifies the pieces a migration needs before any discovery or forwarding
//! is attempted: an ssh client on the operator's machine, and DNS + SSH
//! reachability of both the source and the target.

use anyhow::Result;
use serde::Serialize;

use crate::application::ports::{CommandRunner, NetworkProbe};
use crate::domain::Machine;

/// SSH port probed for reachability.
const SSH_PORT: u16 = 22;

/// Reachability checks for one machine.
#[derive(Debug, Clone, Serialize)]
pub struct MachineChecks {
    /// Machine name as given.
    pub name: String,
    /// Whether the hostname resolves.
    pub dns_ok: bool,
    /// Whether TCP port 22 accepts connections.
    pub ssh_ok: bool,
}

/// Aggregated output of `ferry check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Whether an `ssh` client is available on PATH.
    pub ssh_client_found: bool,
    /// Source machine reachability.
    pub source: MachineChecks,
    /// Target machine reachability.
    pub target: MachineChecks,
}

impl CheckReport {
    /// Flatten failed checks into operator-facing issue lines.
    #[must_use]
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.ssh_client_found {
            issues.push("ssh client not found on PATH".to_string());
        }
        for checks in [&self.source, &self.target] {
            if !checks.dns_ok {
                issues.push(format!("'{}' does not resolve", checks.name));
            }
            if !checks.ssh_ok {
                issues.push(format!("'{}' is not reachable over SSH", checks.name));
            }
        }
        issues
    }

    /// True when every check passed.
    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.issues().is_empty()
    }
}

/// Run all pre-migration checks against the machine pair.
///
/// Probe failures count as unreachable rather than aborting the report —
/// the point of `check` is to show what is broken.
///
/// # Errors
///
/// Currently infallible in practice; `Result` keeps the service signature
/// uniform with the other use-cases.
pub async fn check(
    runner: &impl CommandRunner,
    probe: &impl NetworkProbe,
    source: &Machine,
    target: &Machine,
) -> Result<CheckReport> {
    let ssh_client_found = match runner.run("ssh", &["-V"]).await {
        Ok(output) => output.status.success(),
        Err(_) => false,
    };

    Ok(CheckReport {
        ssh_client_found,
        source: machine_checks(probe, source).await,
        target: machine_checks(probe, target).await,
    })
}

async fn machine_checks(probe: &impl NetworkProbe, machine: &Machine) -> MachineChecks {
    let dns_ok = probe
        .check_dns_resolution(machine.host())
        .await
        .unwrap_or(false);
    let ssh_ok = probe
        .check_tcp_connectivity(machine.host(), SSH_PORT)
        .await
        .unwrap_or(false);
    MachineChecks {
        name: machine.name().to_string(),
        dns_ok,
        ssh_ok,
    }
}
