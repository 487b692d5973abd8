// SQLite-backed job queue facade (producer side)

use crate::error::map_sqlx_error;
use crate::{job_store, SqliteJobTransaction, SqlitePoolExecutor};
use sqlx::SqlitePool;
use std::sync::Arc;
use stowage_core::domain::{Job, JobId};
use stowage_core::error::Result;
use stowage_core::port::TimeProvider;
use stowage_core::{EnqueueConfig, EnqueueService};

/// Wires the enqueue use cases to a caller-supplied pool.
///
/// Transactions are opened with [`SqliteJobQueue::begin`] and stay under the
/// caller's control: the `*_in_tx` methods only add statements to them.
#[derive(Clone)]
pub struct SqliteJobQueue {
    pool: SqlitePool,
    service: EnqueueService,
}

impl SqliteJobQueue {
    pub fn new(
        pool: SqlitePool,
        time_provider: Arc<dyn TimeProvider>,
        config: EnqueueConfig,
    ) -> Self {
        Self {
            pool,
            service: EnqueueService::new(time_provider, config),
        }
    }

    /// Start a transaction the caller commits or rolls back
    pub async fn begin(&self) -> Result<SqliteJobTransaction> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(SqliteJobTransaction::new(tx))
    }

    /// Enqueue on a pooled connection; `job.id` and `job.run_at` are filled in
    pub async fn enqueue(&self, job: &mut Job) -> Result<()> {
        let mut executor = SqlitePoolExecutor::new(self.pool.clone());
        self.service.enqueue(job, &mut executor).await
    }

    /// Enqueue inside `tx`; the job exists only if `tx` is committed
    pub async fn enqueue_in_tx(
        &self,
        job: &mut Job,
        tx: &mut SqliteJobTransaction,
    ) -> Result<()> {
        self.service.enqueue(job, tx).await
    }

    /// Enqueue many jobs; chunks are committed one by one
    pub async fn bulk_enqueue(&self, jobs: &mut [Job]) -> Result<u64> {
        let mut executor = SqlitePoolExecutor::new(self.pool.clone());
        self.service.bulk_enqueue(jobs, &mut executor).await
    }

    /// Enqueue many jobs inside `tx`, all or nothing
    pub async fn bulk_enqueue_in_tx(
        &self,
        jobs: &mut [Job],
        tx: &mut SqliteJobTransaction,
    ) -> Result<u64> {
        self.service.bulk_enqueue(jobs, tx).await
    }

    pub async fn find_job(&self, id: JobId) -> Result<Option<Job>> {
        job_store::find_job(&self.pool, id).await
    }

    /// Number of stored jobs of the given type
    pub async fn count_jobs(&self, job_type: &str) -> Result<i64> {
        job_store::count_jobs(&self.pool, job_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;
    use stowage_core::port::Transaction;

    #[tokio::test]
    async fn test_enqueue_only_type() {
        let db = TestDb::new().await;
        let queue = db.queue();

        let mut job = Job::new("MyJob");
        queue.enqueue(&mut job).await.unwrap();

        let found = queue.find_job(job.id).await.unwrap().unwrap();
        assert!(found.id > 0);
        assert_eq!(found.queue, "");
        assert_eq!(found.priority, 100);
        assert!(found.run_at.is_some());
        assert_eq!(found.run_at, job.run_at);
        assert_eq!(found.job_type.as_str(), "MyJob");
        assert_eq!(found.args, b"[]".to_vec());
        assert_eq!(found.error_count, 0);
        assert!(found.last_error.is_none());
    }

    #[tokio::test]
    async fn test_enqueue_in_tx_visible_inside_only() {
        let db = TestDb::new().await;
        let queue = db.queue();

        let mut tx = queue.begin().await.unwrap();
        let mut job = Job::new("MyJob");
        queue.enqueue_in_tx(&mut job, &mut tx).await.unwrap();

        assert!(tx.find_job(job.id).await.unwrap().is_some());
        assert_eq!(queue.count_jobs("MyJob").await.unwrap(), 0);

        tx.commit().await.unwrap();
        assert_eq!(queue.count_jobs("MyJob").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_dropped_tx_rolls_back() {
        let db = TestDb::new().await;
        let queue = db.queue();

        {
            let mut tx = queue.begin().await.unwrap();
            let mut job = Job::new("MyJob");
            queue.enqueue_in_tx(&mut job, &mut tx).await.unwrap();
        }

        assert_eq!(queue.count_jobs("MyJob").await.unwrap(), 0);
    }
}
