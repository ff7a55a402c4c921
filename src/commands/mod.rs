//! Command implementations

pub mod check;
pub mod migrate;
pub mod plan;
pub mod status;
pub mod version;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::domain::{Directive, PortMapFile, parse_expose, parse_forward};

/// Mapping directive flags shared by `migrate` and `plan`.
///
/// Directive order is port-map file first, then `--forward`, then `--expose`,
/// so command-line flags win over file entries under last-directive-wins.
#[derive(Args, Debug)]
pub struct DirectiveArgs {
    /// Replace the target port for a discovered port (repeatable)
    #[arg(long, value_name = "PORT[:TARGET]")]
    pub forward: Vec<String>,

    /// Map a port discovery will not find (repeatable)
    #[arg(long, value_name = "SOURCE[:TARGET]")]
    pub expose: Vec<String>,

    /// Ignore discovered ports; use only user-defined mappings
    #[arg(long)]
    pub user_ports_only: bool,

    /// YAML port-map file applied before the flags above
    #[arg(long, value_name = "FILE")]
    pub port_map: Option<PathBuf>,
}

impl DirectiveArgs {
    /// Assemble the full directive list. All specs are validated here, before
    /// any discovery or resolution runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the port-map file cannot be read or any spec fails
    /// port validation.
    pub fn directives(&self) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();
        if let Some(path) = &self.port_map {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading port-map file {}", path.display()))?;
            let file = PortMapFile::from_yaml(&text)
                .with_context(|| format!("parsing port-map file {}", path.display()))?;
            directives.extend(file.directives()?);
        }
        if self.user_ports_only {
            directives.push(Directive::DisableDefaults);
        }
        for spec in &self.forward {
            directives.push(parse_forward(spec)?);
        }
        for spec in &self.expose {
            directives.push(parse_expose(spec)?);
        }
        Ok(directives)
    }
}
