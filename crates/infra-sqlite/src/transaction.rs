// SQLite Transaction Implementation

use crate::error::map_sqlx_error;
use crate::job_store;
use async_trait::async_trait;
use sqlx::{Sqlite, SqliteConnection, Transaction as SqlxTransaction};
use stowage_core::domain::{Job, JobId};
use stowage_core::error::Result;
use stowage_core::port::{InsertedJob, JobExecutor, Transaction};

/// Caller-owned transaction that job statements can join.
///
/// Dropping it without `commit` rolls back, like the underlying sqlx
/// transaction.
pub struct SqliteJobTransaction {
    tx: SqlxTransaction<'static, Sqlite>,
}

impl SqliteJobTransaction {
    pub fn new(tx: SqlxTransaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    /// Connection of this transaction, for the caller's own statements
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Read a job as seen from inside this transaction
    pub async fn find_job(&mut self, id: JobId) -> Result<Option<Job>> {
        job_store::find_job(&mut *self.tx, id).await
    }

    pub async fn count_jobs(&mut self, job_type: &str) -> Result<i64> {
        job_store::count_jobs(&mut *self.tx, job_type).await
    }
}

#[async_trait]
impl Transaction for SqliteJobTransaction {
    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl JobExecutor for SqliteJobTransaction {
    async fn insert_job(&mut self, job: &Job) -> Result<InsertedJob> {
        job_store::insert_job(&mut *self.tx, job).await
    }

    async fn insert_jobs(&mut self, jobs: &[Job]) -> Result<u64> {
        job_store::insert_jobs(&mut *self.tx, jobs).await
    }
}
