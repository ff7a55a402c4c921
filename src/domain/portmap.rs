//! Mapping directive parsing — flag specs and the YAML port-map file.
//!
//! Pure functions only — no I/O, no async, no filesystem access. The command
//! layer reads the file and hands the text here.

use anyhow::Result;

use crate::domain::error::MappingError;
use crate::domain::mapping::Directive;
use crate::domain::port::Port;
use serde::{Deserialize, Serialize};

// ── Spec parsing ──────────────────────────────────────────────────────────────

/// Parse a `PORT` or `PORT:PORT` pair spec. A bare `PORT` maps to itself.
///
/// # Errors
///
/// Returns an error if either side is not a valid port or the spec has more
/// than one `:` separator.
pub fn parse_pair(spec: &str) -> Result<(Port, Port), MappingError> {
    let trimmed = spec.trim();
    match trimmed.split_once(':') {
        None => {
            let port = Port::parse(trimmed)?;
            Ok((port, port))
        }
        Some((left, right)) => {
            if right.contains(':') {
                return Err(MappingError::InvalidSpec(trimmed.to_string()));
            }
            Ok((Port::parse(left)?, Port::parse(right)?))
        }
    }
}

/// Parse a `--forward` spec into an override directive.
///
/// # Errors
///
/// Returns an error if the spec is malformed.
pub fn parse_forward(spec: &str) -> Result<Directive, MappingError> {
    let (port, new_target) = parse_pair(spec)?;
    Ok(Directive::Override { port, new_target })
}

/// Parse an `--expose` spec into an add directive.
///
/// # Errors
///
/// Returns an error if the spec is malformed.
pub fn parse_expose(spec: &str) -> Result<Directive, MappingError> {
    let (source, target) = parse_pair(spec)?;
    Ok(Directive::Add { source, target })
}

// ── Port-map file schema ──────────────────────────────────────────────────────

/// Port-map file loaded via `--port-map <FILE>`:
///
/// ```yaml
/// default_ports: true
/// forward:
///   - "80:8080"
/// expose:
///   - "11111"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortMapFile {
    /// Whether discovered ports seed the mapping table.
    pub default_ports: bool,
    /// Override specs, `PORT[:TARGET]`.
    pub forward: Vec<String>,
    /// Addition specs, `SOURCE[:TARGET]`.
    pub expose: Vec<String>,
}

impl Default for PortMapFile {
    fn default() -> Self {
        Self {
            default_ports: true,
            forward: Vec::new(),
            expose: Vec::new(),
        }
    }
}

impl PortMapFile {
    /// Parse the YAML text of a port-map file.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML or unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let file: Self = serde_yaml::from_str(text)?;
        Ok(file)
    }

    /// Expand the file into directives, file order preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if any spec fails port validation — the whole file is
    /// rejected before any directive is produced.
    pub fn directives(&self) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();
        if !self.default_ports {
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
