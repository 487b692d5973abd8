//! Stowage CLI - enqueue jobs into a SQLite-backed job queue

mod input;
mod logging;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use sqlx::SqlitePool;
use tabled::{Table, Tabled};
use tracing::info;

use stowage_core::application::enqueue::constants::DEFAULT_BATCH_SIZE;
use stowage_core::domain::Job;
use stowage_core::port::time_provider::SystemTimeProvider;
use stowage_core::EnqueueConfig;
use stowage_infra_sqlite::{create_pool, run_migrations, SqliteJobQueue};

const DEFAULT_DB_PATH: &str = "~/.stowage/jobs.db";

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Stowage job queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database file
    #[arg(long, global = true, env = "STOWAGE_DB_PATH", default_value = DEFAULT_DB_PATH)]
    db: String,

    /// Rows per insert statement for bulk enqueue
    #[arg(long, global = true, env = "STOWAGE_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Log output format (pretty or json)
    #[arg(long, global = true, env = "STOWAGE_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the job table if it does not exist
    Migrate,

    /// Enqueue a single job
    Enqueue {
        /// Job type (handler name)
        #[arg(short = 't', long = "type")]
        job_type: String,

        /// Queue name (empty = default queue)
        #[arg(short, long, default_value = "")]
        queue: String,

        /// Priority, lower runs sooner (0 = queue default)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        priority: i16,

        /// Delay before the job may run, in seconds
        #[arg(long)]
        run_in: Option<i64>,

        /// Args as a JSON string, stored verbatim
        #[arg(short, long)]
        args: Option<String>,
    },

    /// Enqueue jobs from a JSON-lines file ("-" reads stdin)
    BulkEnqueue {
        /// Path to the file
        file: String,
    },
}

#[derive(Tabled)]
struct EnqueuedJob {
    job_id: i64,
    job_type: String,
    queue: String,
    priority: i16,
    run_at: String,
}

impl From<&Job> for EnqueuedJob {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.id,
            job_type: job.job_type.to_string(),
            queue: job.queue.clone(),
            priority: job.priority,
            run_at: job
                .run_at
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Micros, true))
                .unwrap_or_default(),
        }
    }
}

async fn open_pool(db: &str) -> Result<SqlitePool> {
    let db_path = shellexpand::tilde(db).into_owned();
    if let Some(parent) = Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    info!(db_path = %db_path, "Opening database...");

    create_pool(&format!("sqlite://{db_path}"))
        .await
        .context("DB pool creation failed")
}

/// Queue over a migrated pool; the batch size is only checked here
async fn open_queue(pool: SqlitePool, batch_size: usize) -> Result<SqliteJobQueue> {
    let config = EnqueueConfig::default().with_batch_size(batch_size)?;
    run_migrations(&pool).await.context("Migration failed")?;
    Ok(SqliteJobQueue::new(pool, Arc::new(SystemTimeProvider), config))
}

async fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        tokio::task::spawn_blocking(|| std::io::read_to_string(std::io::stdin()))
            .await?
            .context("Failed to read stdin")
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read {file}"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_format)?;

    let pool = open_pool(&cli.db).await?;

    match cli.command {
        Commands::Migrate => {
            run_migrations(&pool).await.context("Migration failed")?;
            println!("{}", "✓ Schema is up to date".green().bold());
        }

        Commands::Enqueue {
            job_type,
            queue: queue_name,
            priority,
            run_in,
            args,
        } => {
            let mut job = Job::new(job_type)
                .with_queue(queue_name)
                .with_priority(priority);
            if let Some(seconds) = run_in {
                job = job.with_run_at(input::run_at_in(Utc::now(), seconds)?);
            }
            if let Some(raw) = args {
                job = job.with_args(input::json_args(&raw)?);
            }

            let queue = open_queue(pool, cli.batch_size).await?;
            queue.enqueue(&mut job).await.context("Enqueue failed")?;

            println!("{}", "✓ Job enqueued successfully".green().bold());
            println!();
            println!("{}", Table::new(vec![EnqueuedJob::from(&job)]));
        }

        Commands::BulkEnqueue { file } => {
            let contents = read_input(&file).await?;
            let mut jobs = input::parse_job_lines(&contents)?;

            let queue = open_queue(pool, cli.batch_size).await?;
            let inserted = queue
                .bulk_enqueue(&mut jobs)
                .await
                .context("Bulk enqueue failed; earlier chunks may already be stored")?;

            println!(
                "{}",
                format!("✓ {inserted} jobs enqueued").green().bold()
            );
        }
    }

    Ok(())
}
