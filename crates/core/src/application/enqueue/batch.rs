// Batch Planner: bulk enqueue in bounded multi-row inserts

use super::normalize::normalize;
use crate::domain::Job;
use crate::error::{QueueError, Result};
use crate::port::{JobExecutor, TimeProvider};
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

/// Split `items` into contiguous chunks of at most `batch_size`, keeping order.
///
/// Yields `ceil(len / batch_size)` chunks; only the last one may be short.
pub fn make_batches<T>(items: &[T], batch_size: NonZeroUsize) -> Vec<&[T]> {
    items.chunks(batch_size.get()).collect()
}

/// Normalize every job, then insert them chunk by chunk.
///
/// Any job without a type fails the whole call before a statement is issued.
/// Chunks are submitted sequentially; the first failing chunk aborts the rest
/// and the chunks before it stay inserted unless `executor` is a transaction
/// the caller later rolls back.
///
/// Returns the total number of rows inserted.
#[tracing::instrument(
    "bulk_enqueue",
    skip_all,
    fields(jobs = jobs.len(), batch_size = batch_size.get())
)]
pub async fn execute(
    executor: &mut dyn JobExecutor,
    time_provider: &dyn TimeProvider,
    batch_size: NonZeroUsize,
    jobs: &mut [Job],
) -> Result<u64> {
    if jobs.iter().any(|job| job.job_type.is_empty()) {
        return Err(QueueError::MissingType);
    }

    let now = time_provider.now();
    for job in jobs.iter_mut() {
        normalize(job, now)?;
    }

    let batches = make_batches(jobs, batch_size);
    let chunks = batches.len();
    let mut inserted = 0;

    for (index, batch) in batches.into_iter().enumerate() {
        debug!(chunk = index + 1, chunks, rows = batch.len(), "Inserting chunk");

        match executor.insert_jobs(batch).await {
            Ok(rows) => inserted += rows,
            Err(e) => {
                warn!(
                    chunk = index + 1,
                    chunks,
                    inserted,
                    error = %e,
                    "Chunk insert failed, aborting remaining chunks"
                );
                return Err(e);
            }
        }
    }

    info!(rows = inserted, chunks, "Jobs added to queue");

    Ok(inserted)
}
