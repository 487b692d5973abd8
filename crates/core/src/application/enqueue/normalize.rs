// Validation and defaulting, run before any statement is issued

use super::constants::{DEFAULT_ARGS, DEFAULT_PRIORITY, DEFAULT_QUEUE};
use crate::domain::Job;
use crate::error::{QueueError, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Reject jobs without a type and fill every field left at its zero value.
///
/// Only zero values are replaced; anything the caller set is kept as is.
/// On error the job is left untouched.
pub fn normalize(job: &mut Job, now: DateTime<Utc>) -> Result<()> {
    // Exact check, whitespace-only types are accepted
    if job.job_type.is_empty() {
        return Err(QueueError::MissingType);
    }

    if job.queue.is_empty() {
        job.queue = DEFAULT_QUEUE.to_string();
    }
    if job.priority == 0 {
        job.priority = DEFAULT_PRIORITY;
    }
    if job.run_at.is_none() {
        job.run_at = Some(now);
    }
    if job.args.is_empty() {
        job.args = DEFAULT_ARGS.to_vec();
    }

    debug!(
        job_type = %job.job_type,
        queue = %job.queue,
        priority = job.priority,
        "Job normalized"
    );

    Ok(())
}
