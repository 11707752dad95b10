// Library root — exposes internal modules for integration tests in `tests/`.
// Production entry point remains `src/main.rs`.

pub mod api;
pub mod db;
pub mod error;
pub mod estimates;
pub mod format;
pub mod ingestion;
pub mod metrics;
pub mod query;
pub mod repository;
pub mod scheduler;
pub mod services;
pub mod store;

// These modules are only needed by the binary.
// Declared pub so integration tests can reach them if needed, but they
// contain no logic of interest to tests.
pub mod cli;
pub mod config;
pub mod logging;

#[cfg(test)]
mod testutil;
