//! Forwarding infrastructure — implements `ForwardingSink` with iptables.
//!
//! Rules live in a dedicated `FERRY` nat chain on the target machine. The
//! chain is flushed and rebuilt on every apply, so re-running a migration
//! replaces the previous rule set instead of stacking duplicates.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{ForwardingSink, RemoteExec};
use crate::domain::{Machine, MappingTable};

/// Name of the nat chain owned by ferry on the target machine.
const CHAIN: &str = "FERRY";

/// Production `ForwardingSink` — installs DNAT rules over the given remote
/// executor.
pub struct IptablesForwardingSink<E> {
    exec: E,
}

impl<E: RemoteExec> IptablesForwardingSink<E> {
    #[must_use]
    pub fn new(exec: E) -> Self {
        Self { exec }
    }

    async fn iptables(&self, machine: &Machine, args: &[&str]) -> Result<Output> {
        let mut full = vec!["sudo", "iptables"];
        full.extend_from_slice(args);
        self.exec.exec(machine, &full).await
    }

    async fn iptables_ok(&self, machine: &Machine, args: &[&str]) -> Result<()> {
        let output = self.iptables(machine, args).await?;
        anyhow::ensure!(
            output.status.success(),
            "iptables {args:?} failed on '{machine}': {stderr}",
            stderr = String::from_utf8_lossy(&output.stderr).trim()
        );
        Ok(())
    }

    /// Append `rule_args` unless an identical rule is already present
    /// (`-C` probes, `-A` appends).
    async fn iptables_idempotent_append(
        &self,
        machine: &Machine,
        table: &str,
        rule_args: &[&str],
    ) -> Result<()> {
        let mut check = vec!["-t", table, "-C"];
        check.extend_from_slice(rule_args);
        let present = self.iptables(machine, &check).await?.status.success();
        if present {
            return Ok(());
        }
        let mut append = vec!["-t", table, "-A"];
        append.extend_from_slice(rule_args);
        self.iptables_ok(machine, &append).await
    }
}

impl<E: RemoteExec> ForwardingSink for IptablesForwardingSink<E> {
    async fn apply(&self, target: &Machine, source: &Machine, table: &MappingTable) -> Result<()> {
        // Chain creation fails when it already exists; the flush below is the
        // call that must succeed.
        let _ = self.iptables(target, &["-t", "nat", "-N", CHAIN]).await;
        self.iptables_ok(target, &["-t", "nat", "-F", CHAIN])
            .await
            .context("resetting the ferry nat chain")?;
        self.iptables_idempotent_append(target, "nat", &["PREROUTING", "-p", "tcp", "-j", CHAIN])
            .await
            .context("wiring the ferry chain into PREROUTING")?;

        for mapping in table {
            let dport = mapping.target.to_string();
            let destination = format!("{host}:{port}", host = source.host(), port = mapping.source);
            self.iptables_ok(
                target,
                &[
                    "-t",
                    "nat",
                    "-A",
                    CHAIN,
                    "-p",
                    "tcp",
                    "--dport",
                    &dport,
                    "-j",
                    "DNAT",
                    "--to-destination",
                    &destination,
                ],
            )
            .await
            .with_context(|| format!("installing rule {dport} -> {destination}"))?;
        }

        if table.is_empty() {
            return Ok(());
        }

        let sysctl = self
            .exec
            .exec(target, &["sudo", "sysctl", "-qw", "net.ipv4.ip_forward=1"])
            .await
            .context("enabling IP forwarding")?;
        anyhow::ensure!(
            sysctl.status.success(),
            "could not enable IP forwarding on '{target}'"
        );
        self.iptables_idempotent_append(target, "nat", &["POSTROUTING", "-j", "MASQUERADE"])
            .await
            .context("ensuring masquerade for forwarded traffic")?;
        Ok(())
    }
}
