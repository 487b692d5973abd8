// Port Layer - Interfaces for external dependencies

pub mod executor;
pub mod time_provider;
pub mod transaction;

// Re-exports
pub use executor::{InsertedJob, JobExecutor};
pub use time_provider::TimeProvider;
pub use transaction::Transaction;

#[cfg(test)]
pub use executor::MockJobExecutor;
