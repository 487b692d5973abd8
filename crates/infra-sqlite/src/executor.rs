// Pooled executor: each statement runs on a connection taken from the pool

use crate::job_store;
use async_trait::async_trait;
use sqlx::SqlitePool;
use stowage_core::domain::Job;
use stowage_core::error::Result;
use stowage_core::port::{InsertedJob, JobExecutor};

/// Executes job statements directly on a pool; every statement commits on
/// its own. Cheap to clone.
#[derive(Clone)]
pub struct SqlitePoolExecutor {
    pool: SqlitePool,
}

impl SqlitePoolExecutor {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobExecutor for SqlitePoolExecutor {
    async fn insert_job(&mut self, job: &Job) -> Result<InsertedJob> {
        job_store::insert_job(&self.pool, job).await
    }

    async fn insert_jobs(&mut self, jobs: &[Job]) -> Result<u64> {
        job_store::insert_jobs(&self.pool, jobs).await
    }
}
