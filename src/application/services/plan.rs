//! Plan service — discover the source's ports and resolve the mapping table.
//!
//! Shared by `ferry plan` (dry run) and `ferry migrate` (first half of the
//! flow). Discovery is performed fresh on every call; the engine never reuses
//! a previous snapshot.

use anyhow::{Context, Result};

use crate::application::ports::{PortDiscovery, ProgressReporter};
use crate::domain::{Directive, Machine, Resolution, resolve};

/// Discover listening ports on `source` and resolve them against `directives`.
///
/// Resolution diagnostics are reported as warnings but left in the returned
/// [`Resolution`] so callers can render them structurally.
///
/// # Errors
///
/// Returns an error if discovery fails.
pub async fn plan(
    discovery: &impl PortDiscovery,
    reporter: &impl ProgressReporter,
    source: &Machine,
    directives: &[Directive],
) -> Result<Resolution> {
    reporter.step(&format!("Inspecting listening ports on '{source}'"));
    let discovered = discovery
        .discover(source)
        .await
        .with_context(|| format!("discovering ports on '{source}'"))?;
    reporter.success(&format!(
        "Found {count} listening port(s)",
        count = discovered.len()
    ));

    let resolution = resolve(&discovered, directives);
    for diagnostic in &resolution.diagnostics {
        reporter.warn(&diagnostic.to_string());
    }
    if resolution.table.is_empty() {
        reporter.warn("Nothing to forward: resolved mapping table is empty");
    }
    Ok(resolution)
}
