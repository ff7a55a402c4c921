//! Machine addressing and pure validation.
//!
//! A machine is addressed the way SSH addresses it: `[user@]hostname`. The
//! grammar check here keeps obviously malformed names (and shell-hostile
//! characters) out of every remote command the CLI builds.

use std::fmt;

use anyhow::Result;

use crate::domain::error::MachineError;

/// A validated SSH destination for a source or target machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    name: String,
}

impl Machine {
    /// Parse and validate a `[user@]hostname` machine name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, too long, or contains characters
    /// outside the SSH destination grammar.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (user, host) = match trimmed.split_once('@') {
            Some((user, host)) => (Some(user), host),
            None => (None, trimmed),
        };
        if let Some(user) = user
            && (user.is_empty()
                || !user
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'))
        {
            return Err(MachineError::InvalidName(raw.to_string()).into());
        }
        if !valid_hostname(host) {
            return Err(MachineError::InvalidName(raw.to_string()).into());
        }
        Ok(Self {
            name: trimmed.to_string(),
        })
    }

    /// The full `[user@]hostname` form, as passed to `ssh`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The hostname part, with any `user@` prefix stripped.
    #[must_use]
    pub fn host(&self) -> &str {
        self.name
            .split_once('@')
            .map_or(self.name.as_str(), |(_, host)| host)
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Hostname grammar: dot-separated labels of alphanumerics and hyphens, no
/// label starting or ending with a hyphen, 253 chars total. Bare IPv4
/// addresses satisfy the same grammar.
fn valid_hostname(host: &str) -> bool {
    if host.is_empty() || host.len() > 253 {
        return false;
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
