// Job Executor Port (Interface)
//
// One capability shared by a pooled connection and a caller transaction:
// run a parameterized insert against the job table.

use crate::domain::{Job, JobId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage-assigned fields read back from a single-row insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertedJob {
    pub id: JobId,

    /// `run_at` as stored (microsecond resolution)
    pub run_at: DateTime<Utc>,
}

/// Statement executor for job rows
///
/// Jobs handed to an executor are already normalized: non-empty type,
/// `run_at` set, args non-empty.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobExecutor: Send {
    /// Insert one row and return its storage-assigned fields
    async fn insert_job(&mut self, job: &Job) -> Result<InsertedJob>;

    /// Insert all rows with a single multi-row statement, returning the row count
    async fn insert_jobs(&mut self, jobs: &[Job]) -> Result<u64>;
}
