//! Migration record persisted after a successful `ferry migrate`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::mapping::MappingTable;

/// Record of the last completed migration, stored at `~/.ferry/state.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// Source machine whose service was migrated.
    pub source: String,
    /// Target machine now forwarding for it.
    pub target: String,
    /// When the forwarding rules were installed.
    pub completed_at: DateTime<Utc>,
    /// The mapping table that was applied.
    pub mappings: MappingTable,
}
