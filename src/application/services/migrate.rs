//! Migrate service — install a resolved mapping table and record the result.
//!
//! The first half of a migration (discovery + resolution) lives in
//! [`super::plan`]; this service consumes its output so the command layer can
//! confirm with the operator in between.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::application::ports::{ForwardingSink, MigrationStateStore, ProgressReporter};
use crate::domain::{Machine, MappingTable, MigrationRecord};

/// Install `table` on `target` and persist the migration record.
///
/// An empty table is valid ("nothing to forward"): the sink is skipped but
/// the record is still written so `ferry status` reflects the run.
///
/// # Errors
///
/// Returns an error if rule installation or record persistence fails.
pub async fn apply(
    sink: &impl ForwardingSink,
    store: &impl MigrationStateStore,
    reporter: &impl ProgressReporter,
    source: &Machine,
    target: &Machine,
    table: &MappingTable,
) -> Result<MigrationRecord> {
    if table.is_empty() {
        reporter.warn("No mappings to install; skipping forwarding setup");
    } else {
        reporter.step(&format!(
            "Installing {count} forwarding rule(s) on '{target}'",
            count = table.len()
        ));
        sink.apply(target, source, table)
            .await
            .with_context(|| format!("installing forwarding rules on '{target}'"))?;
        reporter.success("Forwarding rules installed");
    }

    let record = MigrationRecord {
        source: source.name().to_string(),
        target: target.name().to_string(),
        completed_at: Utc::now(),
        mappings: table.clone(),
    };
    store.save(&record).context("recording migration state")?;
    Ok(record)
}
