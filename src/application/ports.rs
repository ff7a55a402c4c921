//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::process::Output;

use anyhow::Result;

use crate::domain::{Machine, MappingTable, MigrationRecord, Port};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Remote Execution Port ─────────────────────────────────────────────────────

/// Runs a command on a remote machine and captures its output.
#[allow(async_fn_in_trait)]
pub trait RemoteExec {
    /// Execute `args` on `machine` and capture output.
    async fn exec(&self, machine: &Machine, args: &[&str]) -> Result<Output>;
}

impl<T: RemoteExec + ?Sized> RemoteExec for &T {
    async fn exec(&self, machine: &Machine, args: &[&str]) -> Result<Output> {
        (**self).exec(machine, args).await
    }
}

// ── Discovery Port ────────────────────────────────────────────────────────────

/// Introspects a machine for listening ports.
///
/// Side-effecting network probe — potentially slow or flaky; retry policy
/// belongs to callers. Each call returns a fresh snapshot in the order the
/// machine reported it; the resolution engine never sees stale results.
#[allow(async_fn_in_trait)]
pub trait PortDiscovery {
    /// Return the ports currently listening on `machine`.
    async fn discover(&self, machine: &Machine) -> Result<Vec<Port>>;
}

// ── Forwarding Port ───────────────────────────────────────────────────────────

/// Installs forwarding rules on the target machine.
#[allow(async_fn_in_trait)]
pub trait ForwardingSink {
    /// Make `target` forward each mapping's target port to the corresponding
    /// source port on `source`.
    async fn apply(&self, target: &Machine, source: &Machine, table: &MappingTable) -> Result<()>;
}

// ── State Port ────────────────────────────────────────────────────────────────

/// Abstracts migration record persistence (load/save/clear).
pub trait MigrationStateStore {
    /// Load the last recorded migration, returning `None` if no record exists.
    fn load(&self) -> Result<Option<MigrationRecord>>;
    /// Persist the given migration record.
    fn save(&self, record: &MigrationRecord) -> Result<()>;
    /// Remove any stored record.
    fn clear(&self) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Network Probe Port ────────────────────────────────────────────────────────

/// Abstracts network connectivity checks so application services can be tested
/// without real network access.
#[allow(async_fn_in_trait)]
pub trait NetworkProbe {
    /// Check TCP connectivity to the given host and port.
    async fn check_tcp_connectivity(&self, host: &str, port: u16) -> Result<bool>;
    /// Check DNS resolution for the given hostname.
    async fn check_dns_resolution(&self, hostname: &str) -> Result<bool>;
}
