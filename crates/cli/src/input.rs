//! Job descriptions read from the command line and JSON-lines files.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use stowage_core::domain::Job;

/// One line of a bulk file.
///
/// Omitted fields keep their zero value so the queue defaults apply.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobLine {
    #[serde(rename = "type")]
    pub job_type: String,

    #[serde(default)]
    pub queue: String,

    #[serde(default)]
    pub priority: i16,

    #[serde(default)]
    pub run_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub args: Option<serde_json::Value>,
}

impl JobLine {
    pub fn into_job(self) -> Result<Job> {
        let mut job = Job::new(self.job_type)
            .with_queue(self.queue)
            .with_priority(self.priority);
        job.run_at = self.run_at;
        if let Some(args) = self.args {
            job = job.with_json_args(&args)?;
        }
        Ok(job)
    }
}

/// Parse JSON lines, skipping blank lines and `#` comments
pub fn parse_job_lines(input: &str) -> Result<Vec<Job>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str::<JobLine>(line)
                .with_context(|| format!("Invalid job on line {}", index + 1))?
                .into_job()
        })
        .collect()
}

/// Check that `--args` is JSON; the original text is what gets stored
pub fn json_args(raw: &str) -> Result<Vec<u8>> {
    serde_json::from_str::<serde_json::Value>(raw).context("Invalid JSON args")?;
    Ok(raw.as_bytes().to_vec())
}

/// `now` shifted by `seconds`; negative delays are allowed
pub fn run_at_in(now: DateTime<Utc>, seconds: i64) -> Result<DateTime<Utc>> {
    Duration::try_seconds(seconds)
        .and_then(|delay| now.checked_add_signed(delay))
        .context("--run-in out of range")
}
