//! Shared mock infrastructure for unit tests.
//!
//! Provides canned port-trait implementations so each test file doesn't have
//! to re-define the same boilerplate.

#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not every test file uses every mock

use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::Mutex;

use anyhow::Result;
use ferry_cli::application::ports::{
    CommandRunner, ForwardingSink, MigrationStateStore, NetworkProbe, PortDiscovery,
    ProgressReporter,
};
use ferry_cli::domain::{Machine, MappingTable, MigrationRecord, Port};

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(stderr: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(1 << 8),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

pub fn port(value: u16) -> Port {
    Port::new(value).expect("valid test port")
}

// ── Discovery mocks ───────────────────────────────────────────────────────────

/// Discovery that returns a fixed port list.
pub struct StubDiscovery {
    pub ports: Vec<u16>,
}

impl PortDiscovery for StubDiscovery {
    async fn discover(&self, _machine: &Machine) -> Result<Vec<Port>> {
        Ok(self.ports.iter().map(|&p| port(p)).collect())
    }
}

/// Discovery that always fails, as a flaky guest agent would.
pub struct FailingDiscovery;

impl PortDiscovery for FailingDiscovery {
    async fn discover(&self, machine: &Machine) -> Result<Vec<Port>> {
        anyhow::bail!("connection to '{machine}' refused")
    }
}

// ── Forwarding mocks ──────────────────────────────────────────────────────────

/// Sink that records every applied table.
#[derive(Default)]
pub struct RecordingSink {
    pub applied: Mutex<Vec<(String, String, MappingTable)>>,
}

impl ForwardingSink for RecordingSink {
    async fn apply(&self, target: &Machine, source: &Machine, table: &MappingTable) -> Result<()> {
        self.applied.lock().expect("sink lock").push((
            target.name().to_string(),
            source.name().to_string(),
            table.clone(),
        ));
        Ok(())
    }
}

/// Sink that always fails.
pub struct FailingSink;

impl ForwardingSink for FailingSink {
    async fn apply(
        &self,
        _target: &Machine,
        _source: &Machine,
        _table: &MappingTable,
    ) -> Result<()> {
        anyhow::bail!("iptables not available")
    }
}

// ── State store mock ──────────────────────────────────────────────────────────

/// In-memory state store.
#[derive(Default)]
pub struct MemoryStateStore {
    pub record: Mutex<Option<MigrationRecord>>,
}

impl MigrationStateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<MigrationRecord>> {
        Ok(self.record.lock().expect("store lock").clone())
    }

    fn save(&self, record: &MigrationRecord) -> Result<()> {
        *self.record.lock().expect("store lock") = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.lock().expect("store lock") = None;
        Ok(())
    }
}

// ── Reporter mocks ────────────────────────────────────────────────────────────

/// Reporter that discards everything.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}

/// Reporter that records warnings for assertions.
#[derive(Default)]
pub struct RecordingReporter {
    pub warnings: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, message: &str) {
        self.warnings
            .lock()
            .expect("reporter lock")
            .push(message.to_string());
    }
}

// ── Probe and runner mocks ────────────────────────────────────────────────────

/// Network probe with canned answers.
pub struct StubProbe {
    pub dns: bool,
    pub ssh: bool,
}

impl NetworkProbe for StubProbe {
    async fn check_tcp_connectivity(&self, _host: &str, _port: u16) -> Result<bool> {
        Ok(self.ssh)
    }

    async fn check_dns_resolution(&self, _hostname: &str) -> Result<bool> {
        Ok(self.dns)
    }
}

/// Command runner with a canned answer for `ssh -V`.
pub struct StubRunner {
    pub ssh_present: bool,
}

impl CommandRunner for StubRunner {
    async fn run(&self, _program: &str, _args: &[&str]) -> Result<Output> {
        if self.ssh_present {
            Ok(ok_output(b"OpenSSH_9.6"))
        } else {
            anyhow::bail!("No such file or directory")
        }
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: std::time::Duration,
    ) -> Result<Output> {
        self.run(program, args).await
    }
}

// ── Machine helpers ───────────────────────────────────────────────────────────

pub fn source_machine() -> Machine {
    Machine::parse("app-el7").expect("valid machine")
}

pub fn target_machine() -> Machine {
    Machine::parse("target-el7").expect("valid machine")
}
