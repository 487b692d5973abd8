// Transaction port: lifecycle stays with the caller

use crate::error::Result;
use async_trait::async_trait;

/// Caller-owned transaction. The enqueue use cases only ever execute
/// statements through it; committing or rolling back is up to the caller.
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self) -> Result<()>;
}
