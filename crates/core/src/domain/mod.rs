// Domain Layer - Pure entities

pub mod job;

// Re-exports
pub use job::{Job, JobId, JobType, Priority, QueueName};
