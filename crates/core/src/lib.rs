// Stowage Core - Domain, Enqueue Use Cases & Ports
// NO infrastructure dependencies: storage adapters implement the ports

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{EnqueueConfig, EnqueueService};
pub use domain::{Job, JobId, JobType};
pub use error::{QueueError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
