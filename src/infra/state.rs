//! Migration record persistence.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::MigrationStateStore;
use crate::domain::MigrationRecord;

/// State file manager for the last-migration record.
pub struct StateManager {
    path: PathBuf,
}

impl StateManager {
    /// Create a state manager using the default path (`~/.ferry/state.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
        Ok(Self::with_path(home.join(".ferry").join("state.json")))
    }

    /// Create a state manager with an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl MigrationStateStore for StateManager {
    fn load(&self) -> Result<Option<MigrationRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading state file {}", self.path.display()))?;
        let record: MigrationRecord = serde_json::from_str(&content)
            .with_context(|| format!("parsing state file {}", self.path.display()))?;
        Ok(Some(record))
    }

    fn save(&self, record: &MigrationRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(record).context("serializing state")?;
        std::fs::write(&self.path, &content)
            .with_context(|| format!("writing state file {}", self.path.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", self.path.display()))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("removing state file {}", self.path.display()))?;
        }
        Ok(())
    }
}
