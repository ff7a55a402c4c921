//! Port-mapping resolution — the decision core of a migration.
//!
//! Given the ports discovered on the source machine and the user's mapping
//! directives, [`resolve`] produces the table of forwarding rules the target
//! machine should carry. Pure functions only — no I/O, no async, no shared
//! state; identical inputs always yield an identical table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::port::Port;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Where a mapping entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Seeded from source-machine introspection, target = source.
    Discovered,
    /// A discovered port whose target was replaced by a directive.
    Overridden,
    /// Introduced by a directive, not found by discovery.
    UserDefined,
}

impl Origin {
    /// Stable lowercase label used in tables and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Overridden => "overridden",
            Self::UserDefined => "user-defined",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user mapping directive, applied on top of discovery.
///
/// Closed sum type — the resolver matches exhaustively, so adding a variant
/// forces every decision site to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Replace the target port for a port expected in the discovered set.
    Override { port: Port, new_target: Port },
    /// Map a source port that discovery did not find.
    Add { source: Port, target: Port },
    /// Drop all discovered ports; only user directives produce mappings.
    DisableDefaults,
}

/// One resolved forwarding entry: traffic to `target` on the target machine
/// reaches `source` on the source machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// Port listening on the source machine.
    pub source: Port,
    /// Port the target machine forwards (or exposes) for it.
    pub target: Port,
    /// How this entry entered the table.
    pub origin: Origin,
}

/// Ordered mapping table: discovery order first, then user additions in
/// directive order. Source ports are pairwise distinct by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    entries: Vec<Mapping>,
}

impl MappingTable {
    /// The resolved entries, in table order.
    #[must_use]
    pub fn entries(&self) -> &[Mapping] {
        &self.entries
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Mapping> {
        self.entries.iter()
    }

    /// Look up an entry by source port.
    #[must_use]
    pub fn get(&self, source: Port) -> Option<&Mapping> {
        self.entries.iter().find(|m| m.source == source)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = &'a Mapping;
    type IntoIter = std::slice::Iter<'a, Mapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Non-fatal events observed while resolving. These never abort the run;
/// callers surface them so stale directive configuration stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An override named a port absent from the discovered set; the directive
    /// was applied as an addition instead. Usually stale override config.
    DanglingOverride { port: Port },
    /// An addition named a port already in the table; the directive replaced
    /// the existing target.
    RedundantAdd { port: Port },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingOverride { port } => write!(
                f,
                "override for port {port} matches no discovered port; mapping it as user-defined"
            ),
            Self::RedundantAdd { port } => {
                write!(f, "port {port} was already mapped; later directive wins")
            }
        }
    }
}

/// Result of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The conflict-free mapping table.
    pub table: MappingTable,
    /// Non-fatal observations, in the order they occurred.
    pub diagnostics: Vec<Diagnostic>,
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Merge discovered ports and user directives into one mapping table.
///
/// Precedence: directives beat discovery, and a later directive of the same
/// kind beats an earlier one. Overrides are applied before additions, so an
/// addition colliding with an overridden port takes the final word. When
/// `DisableDefaults` is present the discovered set is ignored entirely and
/// every directive's target is used verbatim with origin
/// [`Origin::UserDefined`].
///
/// Duplicate discovered ports collapse to their first occurrence, so source
/// ports in the result are unique regardless of input.
#[must_use]
pub fn resolve(discovered: &[Port], directives: &[Directive]) -> Resolution {
    let defaults_disabled = directives
        .iter()
        .any(|d| matches!(d, Directive::DisableDefaults));
    if defaults_disabled {
        return resolve_user_only(directives);
    }

    let mut entries: Vec<Mapping> = Vec::with_capacity(discovered.len());
    for &port in discovered {
        if entries.iter().all(|m| m.source != port) {
            entries.push(Mapping {
                source: port,
                target: port,
                origin: Origin::Discovered,
            });
        }
    }

    let mut diagnostics = Vec::new();

    for directive in directives {
        let Directive::Override { port, new_target } = *directive else {
            continue;
        };
        if let Some(entry) = entries.iter_mut().find(|m| m.source == port) {
            entry.target = new_target;
            entry.origin = Origin::Overridden;
        } else {
            diagnostics.push(Diagnostic::DanglingOverride { port });
            entries.push(Mapping {
                source: port,
                target: new_target,
                origin: Origin::UserDefined,
            });
        }
    }

    for directive in directives {
        let Directive::Add { source, target } = *directive else {
            continue;
        };
        if let Some(entry) = entries.iter_mut().find(|m| m.source == source) {
            diagnostics.push(Diagnostic::RedundantAdd { port: source });
            entry.target = target;
            entry.origin = Origin::UserDefined;
        } else {
            entries.push(Mapping {
                source,
                target,
                origin: Origin::UserDefined,
            });
        }
    }

    Resolution {
        table: MappingTable { entries },
        diagnostics,
    }
}

/// `DisableDefaults` mode: every directive is a user insertion, applied in
/// directive order, later directive winning by source port.
fn resolve_user_only(directives: &[Directive]) -> Resolution {
    let mut entries: Vec<Mapping> = Vec::new();
    for directive in directives {
        let (source, target) = match *directive {
            Directive::Override { port, new_target } => (port, new_target),
            Directive::Add { source, target } => (source, target),
            Directive::DisableDefaults => continue,
        };
        if let Some(entry) = entries.iter_mut().find(|m| m.source == source) {
            entry.target = target;
        } else {
            entries.push(Mapping {
                source,
                target,
                origin: Origin::UserDefined,
            });
        }
    }
    Resolution {
        table: MappingTable { entries },
        diagnostics: Vec::new(),
    }
}
