//! Unit tests for the plan service.

#![allow(clippy::expect_used)]

use ferry_cli::application::services::plan::plan;
use ferry_cli::domain::{Directive, Origin};

use crate::mocks::{
    FailingDiscovery, RecordingReporter, SilentReporter, StubDiscovery, port, source_machine,
};

#[tokio::test]
async fn test_plan_maps_discovered_ports_to_themselves() {
    let discovery = StubDiscovery {
        ports: vec![80, 22],
    };
    let resolution = plan(&discovery, &SilentReporter, &source_machine(), &[])
        .await
        .expect("plan");

    let pairs: Vec<(u16, u16)> = resolution
        .table
        .iter()
        .map(|m| (m.source.get(), m.target.get()))
        .collect();
    assert_eq!(pairs, vec![(80, 80), (22, 22)]);
    assert!(resolution.table.iter().all(|m| m.origin == Origin::Discovered));
}

#[tokio::test]
async fn test_plan_reports_dangling_override_as_warning() {
    let discovery = StubDiscovery { ports: vec![22] };
    let reporter = RecordingReporter::default();
    let directives = [Directive::Override {
        port: port(80),
        new_target: port(8080),
    }];

    let resolution = plan(&discovery, &reporter, &source_machine(), &directives)
        .await
        .expect("plan");

    assert_eq!(resolution.diagnostics.len(), 1);
    let warnings = reporter.warnings.lock().expect("lock");
    assert!(
        warnings.iter().any(|w| w.contains("80")),
        "dangling override must be reported: {warnings:?}"
    );
}

#[tokio::test]
async fn test_plan_warns_when_nothing_to_forward() {
    let discovery = StubDiscovery { ports: Vec::new() };
    let reporter = RecordingReporter::default();

    let resolution = plan(&discovery, &reporter, &source_machine(), &[])
        .await
        .expect("plan");

    assert!(resolution.table.is_empty());
    let warnings = reporter.warnings.lock().expect("lock");
    assert!(warnings.iter().any(|w| w.contains("Nothing to forward")));
}

#[tokio::test]
async fn test_plan_propagates_discovery_failure() {
    let err = plan(&FailingDiscovery, &SilentReporter, &source_machine(), &[])
        .await
        .expect_err("discovery failure must propagate");
    assert!(err.to_string().contains("app-el7"));
}

#[tokio::test]
async fn test_plan_is_idempotent_for_identical_inputs() {
    let discovery = StubDiscovery {
        ports: vec![443, 22],
    };
    let directives = [Directive::Add {
        source: port(11111),
        target: port(12000),
    }];

    let first = plan(&discovery, &SilentReporter, &source_machine(), &directives)
        .await
        .expect("first plan");
    let second = plan(&discovery, &SilentReporter, &source_machine(), &directives)
        .await
        .expect("second plan");
    assert_eq!(first, second);
}
