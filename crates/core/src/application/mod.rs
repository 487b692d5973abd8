// Application Layer - Use Cases

pub mod enqueue;

// Re-exports
pub use enqueue::{EnqueueConfig, EnqueueService};
