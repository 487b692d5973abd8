// Job table statements, shared by the pooled and transactional executors

use crate::error::map_sqlx_error;
use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;
use stowage_core::domain::{Job, JobId, JobType};
use stowage_core::error::Result;
use stowage_core::port::InsertedJob;

const INSERT_JOB_PREFIX: &str =
    "INSERT INTO job_queue (queue, priority, run_at, job_class, args) VALUES ";
const ROW_PLACEHOLDERS: &str = "(?, ?, ?, ?, ?)";

/// Insert one job and read back its id and stored run_at
pub(crate) async fn insert_job<'e, E>(executor: E, job: &Job) -> Result<InsertedJob>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{INSERT_JOB_PREFIX}{ROW_PLACEHOLDERS} RETURNING job_id, run_at");

    let (id, run_at): (i64, i64) = sqlx::query_as(&sql)
        .bind(&job.queue)
        .bind(job.priority)
        .bind(job.run_at.map(|t| t.timestamp_micros()))
        .bind(job.job_type.as_str())
        .bind(job.args.as_slice())
        .fetch_one(executor)
        .await
        .map_err(map_sqlx_error)?;

    Ok(InsertedJob {
        id,
        run_at: from_micros(run_at)?,
    })
}

/// Insert all jobs with one multi-row statement
pub(crate) async fn insert_jobs<'e, E>(executor: E, jobs: &[Job]) -> Result<u64>
where
    E: SqliteExecutor<'e>,
{
    if jobs.is_empty() {
        return Ok(0);
    }

    let sql = format!(
        "{INSERT_JOB_PREFIX}{}",
        vec![ROW_PLACEHOLDERS; jobs.len()].join(", ")
    );

    let mut query = sqlx::query(&sql);
    for job in jobs {
        query = query
            .bind(&job.queue)
            .bind(job.priority)
            .bind(job.run_at.map(|t| t.timestamp_micros()))
            .bind(job.job_type.as_str())
            .bind(job.args.as_slice());
    }

    let result = query.execute(executor).await.map_err(map_sqlx_error)?;

    Ok(result.rows_affected())
}

pub(crate) async fn find_job<'e, E>(executor: E, id: JobId) -> Result<Option<Job>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, JobRow>("SELECT * FROM job_queue WHERE job_id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(map_sqlx_error)?;

    row.map(JobRow::into_job).transpose()
}

pub(crate) async fn count_jobs<'e, E>(executor: E, job_type: &str) -> Result<i64>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM job_queue WHERE job_class = ?")
        .bind(job_type)
        .fetch_one(executor)
        .await
        .map_err(map_sqlx_error)
}

fn from_micros(micros: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        map_sqlx_error(sqlx::Error::Decode(
            format!("run_at out of range: {micros}").into(),
        ))
    })
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    job_id: i64,
    queue: String,
    priority: i16,
    run_at: i64, // epoch micros
    job_class: String,
    args: Vec<u8>,
    error_count: i32,
    last_error: Option<String>,
}

impl JobRow {
    fn into_job(self) -> Result<Job> {
        Ok(Job {
            id: self.job_id,
            queue: self.queue,
            priority: self.priority,
            run_at: Some(from_micros(self.run_at)?),
            job_type: JobType::new(self.job_class),
            args: self.args,
            error_count: self.error_count,
            last_error: self.last_error,
        })
    }
}
