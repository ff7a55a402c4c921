//! Port value type and validation.
//!
//! A [`Port`] is always in 1-65535 — construction is the validation boundary,
//! so code past the input layer never sees an out-of-range value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::MappingError;

/// A TCP endpoint number in 1-65535.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Port(u16);

impl Port {
    /// Create a port, rejecting 0.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidPort`] if `value` is 0.
    pub fn new(value: u16) -> Result<Self, MappingError> {
        if value == 0 {
            return Err(MappingError::InvalidPort("0".to_string()));
        }
        Ok(Self(value))
    }

    /// Parse a port from its decimal string form.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidPort`] if `raw` is not a number in 1-65535.
    pub fn parse(raw: &str) -> Result<Self, MappingError> {
        let trimmed = raw.trim();
        let value: u32 = trimmed
            .parse()
            .map_err(|_| MappingError::InvalidPort(trimmed.to_string()))?;
        let value =
            u16::try_from(value).map_err(|_| MappingError::InvalidPort(trimmed.to_string()))?;
        Self::new(value)
    }

    /// The numeric port value.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Port {
    type Error = MappingError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
