//! Port discovery infrastructure — implements `PortDiscovery` via `ss`.
//!
//! The source machine is asked for its TCP listeners with `ss -ltnH`; the
//! local-address column carries the port. Parsing is separated into a pure
//! function so fixtures can exercise it without a machine.

use anyhow::{Context, Result};
use regex::Regex;

use crate::application::ports::{PortDiscovery, RemoteExec};
use crate::domain::{Machine, Port};

/// Production `PortDiscovery` — runs `ss` on the machine over the given
/// remote executor.
pub struct SsPortDiscovery<E> {
    exec: E,
}

impl<E: RemoteExec> SsPortDiscovery<E> {
    #[must_use]
    pub fn new(exec: E) -> Self {
        Self { exec }
    }
}

impl<E: RemoteExec> PortDiscovery for SsPortDiscovery<E> {
    async fn discover(&self, machine: &Machine) -> Result<Vec<Port>> {
        let output = self
            .exec
            .exec(machine, &["ss", "-ltnH"])
            .await
            .context("running ss on the source machine")?;
        anyhow::ensure!(
            output.status.success(),
            "ss failed on '{machine}': {stderr}",
            stderr = String::from_utf8_lossy(&output.stderr).trim()
        );
        parse_listening_ports(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Extract listener ports from `ss -ltnH` output, first occurrence order,
/// duplicates removed (v4 and v6 listeners report the same port twice).
///
/// # Errors
///
/// Returns an error if a listener line carries an invalid port — a mangled
/// snapshot must not silently become a partial discovery result.
pub fn parse_listening_ports(output: &str) -> Result<Vec<Port>> {
    // Local address is the 4th column: `LISTEN 0 128 0.0.0.0:22 0.0.0.0:*`.
    #[allow(clippy::expect_used)] // compile-time constant pattern
    let port_suffix = Regex::new(r":(\d+)$").expect("valid regex");

    let mut ports: Vec<Port> = Vec::new();
    for line in output.lines() {
        let mut fields = line.split_whitespace();
        if fields.next() != Some("LISTEN") {
            continue;
        }
        let Some(local) = fields.nth(2) else {
            continue;
        };
        let captures = port_suffix
            .captures(local)
            .with_context(|| format!("unparseable listener address '{local}'"))?;
        let port = Port::parse(&captures[1])
            .with_context(|| format!("listener address '{local}' carries an invalid port"))?;
        if !ports.contains(&port) {
            ports.push(port);
        }
    }
    Ok(ports)
}
