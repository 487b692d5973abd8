// Throwaway file-backed databases for tests, shared with the integration
// suite through the `test-support` feature.
// File-backed so the pool and an open transaction see separate connections
// of the same database.

use crate::{create_pool, run_migrations, SqliteJobQueue};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stowage_core::domain::Job;
use stowage_core::port::time_provider::SystemTimeProvider;
use stowage_core::EnqueueConfig;

/// A migrated database file, removed with its WAL files on drop
pub struct TestDb {
    pub pool: SqlitePool,
    path: PathBuf,
}

impl TestDb {
    pub async fn new() -> Self {
        let path = std::env::temp_dir().join(format!("stowage-test-{}.db", uuid::Uuid::new_v4()));
        let pool = create_pool(&format!("sqlite://{}", path.display()))
            .await
            .expect("test database");
        run_migrations(&pool).await.expect("test migrations");
        Self { pool, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn queue(&self) -> SqliteJobQueue {
        self.queue_with(EnqueueConfig::default())
    }

    pub fn queue_with(&self, config: EnqueueConfig) -> SqliteJobQueue {
        SqliteJobQueue::new(self.pool.clone(), Arc::new(SystemTimeProvider), config)
    }

    /// The single stored job, if any
    pub async fn find_one_job(&self) -> Option<Job> {
        let id: Option<i64> = sqlx::query_scalar("SELECT job_id FROM job_queue LIMIT 1")
            .fetch_optional(&self.pool)
            .await
            .expect("select job_id");
        match id {
            Some(id) => self.queue().find_job(id).await.expect("find job"),
            None => None,
        }
    }

    pub async fn count_rows(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM job_queue")
            .fetch_one(&self.pool)
            .await
            .expect("count rows")
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}
