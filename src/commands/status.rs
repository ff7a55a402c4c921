//! `ferry status` — show the last recorded migration.

use anyhow::Result;

use crate::application::ports::MigrationStateStore;
use crate::commands::plan::render_table;
use crate::output::OutputContext;

/// Entry point for `ferry status`.
///
/// # Errors
///
/// Returns an error if the state file exists but cannot be read or parsed.
pub fn run(ctx: &OutputContext, store: &impl MigrationStateStore, json: bool) -> Result<()> {
    let Some(record) = store.load()? else {
        if json {
            println!("null");
        } else {
            ctx.info("No migration recorded yet. Run 'ferry migrate' first.");
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        ctx.header("Last migration");
        ctx.kv("Source  ", &record.source);
        ctx.kv("Target  ", &record.target);
        ctx.kv("When    ", &record.completed_at.to_rfc3339());
        print!("{}", render_table(&record.mappings));
    }
    Ok(())
}
