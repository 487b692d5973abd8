//! Test fixtures for the integration suite: a migrated, file-backed SQLite
//! database per test.

pub use stowage_infra_sqlite::test_support::TestDb;
