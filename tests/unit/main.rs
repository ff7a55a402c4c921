//! Unit tests for the ferry CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod migrate_service;
mod mocks;
mod plan_service;
mod property_tests;
