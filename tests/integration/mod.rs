//! Integration Tests Module
//!
//! End-to-end tests over the library with in-memory platform fakes.
//! Covers partition aggregation and merge semantics, roster-wide runs with
//! partial failures, roll-up analytics, the interested-lead pipeline, and
//! the agent tool registry. No test touches the network.

// Shared scripted-platform fake and roster builders
mod support;

// Per-workspace aggregation and merge semantics
mod aggregation_test;

// Roster-wide run coordinator tests
mod run_test;

// Ranking and weekly summary tests
mod analytics_test;

// Interested-lead pipeline tests
mod leads_test;

// Agent tool registry tests
mod tools_test;
