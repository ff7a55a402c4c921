//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Mapping errors ────────────────────────────────────────────────────────────

/// Errors raised while validating port-mapping input.
///
/// These are rejected before any resolution takes place — a failed validation
/// means no mapping table is produced at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("invalid port '{0}': must be a number in 1-65535")]
    InvalidPort(String),

    #[error("invalid mapping spec '{0}': expected PORT or PORT:PORT")]
    InvalidSpec(String),
}

// ── Machine errors ────────────────────────────────────────────────────────────

/// Errors related to machine addressing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("invalid machine name '{0}': expected [user@]hostname")]
    InvalidName(String),
}
