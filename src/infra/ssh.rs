//! SSH infrastructure — implements `RemoteExec` by shelling out to `ssh`.
//!
//! All sessions run with `BatchMode=yes`: a missing key or unknown host fails
//! fast instead of hanging on an interactive prompt.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, RemoteExec};
use crate::domain::Machine;

/// Production `RemoteExec` — runs commands on a machine over `ssh`.
pub struct SshSession<R> {
    runner: R,
}

impl<R: CommandRunner> SshSession<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> RemoteExec for SshSession<R> {
    async fn exec(&self, machine: &Machine, args: &[&str]) -> Result<Output> {
        let mut ssh_args = vec![
            "-o",
            "BatchMode=yes",
            "-o",
            "ConnectTimeout=10",
            machine.name(),
            "--",
        ];
        ssh_args.extend_from_slice(args);
        self.runner
            .run("ssh", &ssh_args)
            .await
            .with_context(|| format!("running remote command on '{machine}'"))
    }
}
