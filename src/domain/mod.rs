//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod error;
pub mod machine;
pub mod mapping;
pub mod migration;
pub mod port;
pub mod portmap;

pub use error::{MachineError, MappingError};
pub use machine::Machine;
pub use mapping::{Diagnostic, Directive, Mapping, MappingTable, Origin, Resolution, resolve};
pub use migration::MigrationRecord;
pub use port::Port;
pub use portmap::{PortMapFile, parse_expose, parse_forward, parse_pair};
