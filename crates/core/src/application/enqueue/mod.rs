// Enqueue Use Cases

pub mod batch;
pub mod constants;
pub mod normalize;

pub use batch::make_batches;
pub use normalize::normalize;

use crate::domain::Job;
use crate::error::{QueueError, Result};
use crate::port::{JobExecutor, TimeProvider};
use constants::{DEFAULT_BATCH_SIZE, INSERT_COLUMNS, MAX_BIND_PARAMETERS};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::info;

/// Enqueue settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnqueueConfig {
    batch_size: NonZeroUsize,
}

impl EnqueueConfig {
    /// Override the bulk insert chunk size.
    ///
    /// Rejects 0 and sizes whose bound parameters would exceed
    /// `MAX_BIND_PARAMETERS` in a single statement.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self> {
        let max = DEFAULT_BATCH_SIZE;
        self.batch_size = NonZeroUsize::new(batch_size)
            .filter(|size| size.get() <= max)
            .ok_or_else(|| {
                QueueError::Config(format!(
                    "batch size must be between 1 and {max} ({INSERT_COLUMNS} parameters per row, \
                     {MAX_BIND_PARAMETERS} per statement), got {batch_size}"
                ))
            })?;
        Ok(self)
    }

    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }
}

impl Default for EnqueueConfig {
    fn default() -> Self {
        Self {
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Insert a single job through `executor`.
///
/// The executor may be a pooled connection or a transaction owned by the
/// caller; in the latter case the row only becomes visible once the caller
/// commits. On success `job.id` and `job.run_at` hold the stored values.
#[tracing::instrument(
    "enqueue",
    skip_all,
    fields(job_type = %job.job_type, job_id = tracing::field::Empty)
)]
pub async fn execute(
    executor: &mut dyn JobExecutor,
    time_provider: &dyn TimeProvider,
    job: &mut Job,
) -> Result<()> {
    normalize(job, time_provider.now())?;

    let inserted = executor.insert_job(job).await?;

    job.id = inserted.id;
    job.run_at = Some(inserted.run_at);

    tracing::Span::current().record("job_id", inserted.id);
    info!(
        job_id = inserted.id,
        job_type = %job.job_type,
        queue = %job.queue,
        "Job added to queue"
    );

    Ok(())
}

/// Enqueue service: holds the clock and batch settings, while the executor
/// is supplied per call by its owner.
#[derive(Clone)]
pub struct EnqueueService {
    time_provider: Arc<dyn TimeProvider>,
    config: EnqueueConfig,
}

impl EnqueueService {
    pub fn new(time_provider: Arc<dyn TimeProvider>, config: EnqueueConfig) -> Self {
        Self {
            time_provider,
            config,
        }
    }

    /// Enqueue one job
    pub async fn enqueue(&self, job: &mut Job, executor: &mut dyn JobExecutor) -> Result<()> {
        execute(executor, self.time_provider.as_ref(), job).await
    }

    /// Enqueue many jobs in chunks of `config.batch_size()`
    pub async fn bulk_enqueue(
        &self,
        jobs: &mut [Job],
        executor: &mut dyn JobExecutor,
    ) -> Result<u64> {
        batch::execute(
            executor,
            self.time_provider.as_ref(),
            self.config.batch_size,
            jobs,
        )
        .await
    }
}
