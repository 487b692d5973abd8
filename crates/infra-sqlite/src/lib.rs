// Stowage Infrastructure - SQLite Adapter
// Implements: JobExecutor (pooled + transactional), Transaction

mod connection;
mod error;
mod executor;
mod job_store;
mod migration;
mod queue;
mod transaction;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use connection::create_pool;
pub use executor::SqlitePoolExecutor;
pub use migration::run_migrations;
pub use queue::SqliteJobQueue;
pub use transaction::SqliteJobTransaction;
