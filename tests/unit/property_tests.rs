//! Property-based tests for the mapping resolution engine.
//!
//! Uses `proptest` to verify the engine's invariants across many random
//! discovered sets and directive lists.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use ferry_cli::domain::{Directive, Origin, Port, resolve};

fn arb_port() -> impl Strategy<Value = Port> {
    (1u16..=65535).prop_map(|v| Port::new(v).expect("nonzero port"))
}

fn arb_discovered() -> impl Strategy<Value = Vec<Port>> {
    proptest::collection::vec(arb_port(), 0..16)
}

fn arb_directive() -> impl Strategy<Value = Directive> {
    prop_oneof![
        (arb_port(), arb_port()).prop_map(|(port, new_target)| Directive::Override {
            port,
            new_target
        }),
        (arb_port(), arb_port()).prop_map(|(source, target)| Directive::Add { source, target }),
        Just(Directive::DisableDefaults),
    ]
}

fn arb_directives() -> impl Strategy<Value = Vec<Directive>> {
    proptest::collection::vec(arb_directive(), 0..12)
}

proptest! {
    /// Source ports in the result are always pairwise distinct.
    #[test]
    fn prop_source_ports_unique(
        discovered in arb_discovered(),
        directives in arb_directives(),
    ) {
        let resolution = resolve(&discovered, &directives);
        let mut sources: Vec<_> = resolution.table.iter().map(|m| m.source).collect();
        let total = sources.len();
        sources.sort_unstable();
        sources.dedup();
        prop_assert_eq!(sources.len(), total, "duplicate source ports in table");
    }

    /// Identical inputs always produce identical output, entry order included.
    #[test]
    fn prop_resolution_deterministic(
        discovered in arb_discovered(),
        directives in arb_directives(),
    ) {
        prop_assert_eq!(
            resolve(&discovered, &directives),
            resolve(&discovered, &directives)
        );
    }

    /// With no directives, the table is the discovered set mapped to itself,
    /// in discovery order.
    #[test]
    fn prop_default_pass_through(discovered in arb_discovered()) {
        let resolution = resolve(&discovered, &[]);
        let mut expected: Vec<Port> = Vec::new();
        for &p in &discovered {
            if !expected.contains(&p) {
                expected.push(p);
            }
        }
        let actual: Vec<Port> = resolution.table.iter().map(|m| m.source).collect();
        prop_assert_eq!(actual, expected);
        for mapping in &resolution.table {
            prop_assert_eq!(mapping.target, mapping.source);
            prop_assert_eq!(mapping.origin, Origin::Discovered);
        }
        prop_assert!(resolution.diagnostics.is_empty());
    }

    /// An override of a discovered port always lands its target.
    #[test]
    fn prop_override_precedence(
        discovered in arb_discovered(),
        new_target in arb_port(),
    ) {
        prop_assume!(!discovered.is_empty());
        let port = discovered[0];
        let resolution = resolve(&discovered, &[Directive::Override { port, new_target }]);
        let entry = resolution.table.get(port).expect("overridden port present");
        prop_assert_eq!(entry.target, new_target);
        prop_assert_eq!(entry.origin, Origin::Overridden);
    }

    /// An addition of an undiscovered port always appears, user-defined.
    #[test]
    fn prop_addition_present(
        discovered in arb_discovered(),
        source in arb_port(),
        target in arb_port(),
    ) {
        prop_assume!(!discovered.contains(&source));
        let resolution = resolve(&discovered, &[Directive::Add { source, target }]);
        let entry = resolution.table.get(source).expect("added port present");
        prop_assert_eq!(entry.target, target);
        prop_assert_eq!(entry.origin, Origin::UserDefined);
    }

    /// With DisableDefaults anywhere in the list, nothing is origin Discovered.
    #[test]
    fn prop_disable_semantics(
        discovered in arb_discovered(),
        directives in arb_directives(),
        position in 0usize..12,
    ) {
        let mut directives = directives;
        let at = position.min(directives.len());
        directives.insert(at, Directive::DisableDefaults);
        let resolution = resolve(&discovered, &directives);
        for mapping in &resolution.table {
            prop_assert_eq!(mapping.origin, Origin::UserDefined);
        }
        prop_assert!(resolution.diagnostics.is_empty());
    }

    /// Every table entry is traceable to the inputs: its source port is either
    /// discovered or named by a directive.
    #[test]
    fn prop_no_invented_entries(
        discovered in arb_discovered(),
        directives in arb_directives(),
    ) {
        let resolution = resolve(&discovered, &directives);
        for mapping in &resolution.table {
            let named = discovered.contains(&mapping.source)
                || directives.iter().any(|d| match *d {
                    Directive::Override { port, .. } => port == mapping.source,
                    Directive::Add { source, .. } => source == mapping.source,
                    Directive::DisableDefaults => false,
                });
            prop_assert!(named, "entry {:?} matches no input", mapping);
        }
    }
}
