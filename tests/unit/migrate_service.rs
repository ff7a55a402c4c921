//! Unit tests for the migrate (apply) service.

#![allow(clippy::expect_used)]

use ferry_cli::application::ports::MigrationStateStore;
use ferry_cli::application::services::migrate::apply;
use ferry_cli::domain::{Directive, MappingTable, resolve};

use crate::mocks::{
    FailingSink, MemoryStateStore, RecordingSink, SilentReporter, port, source_machine,
    target_machine,
};

fn sample_table() -> MappingTable {
    resolve(
        &[port(80), port(22)],
        &[Directive::Override {
            port: port(80),
            new_target: port(8080),
        }],
    )
    .table
}

#[tokio::test]
async fn test_apply_hands_the_table_to_the_sink() {
    let sink = RecordingSink::default();
    let store = MemoryStateStore::default();
    let table = sample_table();

    apply(
        &sink,
        &store,
        &SilentReporter,
        &source_machine(),
        &target_machine(),
        &table,
    )
    .await
    .expect("apply");

    let applied = sink.applied.lock().expect("lock");
    assert_eq!(applied.len(), 1);
    let (target, source, applied_table) = &applied[0];
    assert_eq!(target, "target-el7");
    assert_eq!(source, "app-el7");
    assert_eq!(applied_table, &table);
}

#[tokio::test]
async fn test_apply_records_the_migration() {
    let sink = RecordingSink::default();
    let store = MemoryStateStore::default();
    let table = sample_table();

    let record = apply(
        &sink,
        &store,
        &SilentReporter,
        &source_machine(),
        &target_machine(),
        &table,
    )
    .await
    .expect("apply");

    assert_eq!(record.source, "app-el7");
    assert_eq!(record.target, "target-el7");
    assert_eq!(record.mappings, table);

    let stored = store.load().expect("load").expect("record present");
    assert_eq!(stored.mappings, table);
}

#[tokio::test]
async fn test_apply_empty_table_skips_sink_but_still_records() {
    let sink = RecordingSink::default();
    let store = MemoryStateStore::default();

    apply(
        &sink,
        &store,
        &SilentReporter,
        &source_machine(),
        &target_machine(),
        &MappingTable::default(),
    )
    .await
    .expect("apply");

    assert!(sink.applied.lock().expect("lock").is_empty());
    assert!(store.load().expect("load").is_some());
}

#[tokio::test]
async fn test_apply_sink_failure_leaves_no_record() {
    let store = MemoryStateStore::default();

    let result = apply(
        &FailingSink,
        &store,
        &SilentReporter,
        &source_machine(),
        &target_machine(),
        &sample_table(),
    )
    .await;

    assert!(result.is_err());
    assert!(
        store.load().expect("load").is_none(),
        "a failed apply must not be recorded as completed"
    );
}
