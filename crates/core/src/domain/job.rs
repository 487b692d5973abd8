// Job Domain Model

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Job ID (assigned by storage, 0 until persisted)
pub type JobId = i64;

/// Queue name ("" is the unnamed default queue)
pub type QueueName = String;

/// Priority (lower number = dispatched sooner)
pub type Priority = i16;

/// Job Type: identifies the handler that processes the job
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JobType(String);

impl JobType {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Job Entity
///
/// Fields left at their zero value (`0`, `""`, `None`, empty args) are filled
/// in with queue defaults when the job is enqueued. `error_count` and
/// `last_error` belong to the consumer side and are never written on insert.
#[derive(Debug, Clone, Default)]
pub struct Job {
    pub id: JobId,
    pub queue: QueueName,
    pub priority: Priority,
    pub run_at: Option<DateTime<Utc>>,
    pub job_type: JobType,

    /// Opaque payload, conventionally JSON
    pub args: Vec<u8>,

    pub error_count: i32,
    pub last_error: Option<String>,
}

impl Job {
    /// Create an unpersisted job of the given type with every other field unset
    pub fn new(job_type: impl Into<JobType>) -> Self {
        Self {
            job_type: job_type.into(),
            ..Self::default()
        }
    }

    pub fn with_queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = queue.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_run_at(mut self, run_at: DateTime<Utc>) -> Self {
        self.run_at = Some(run_at);
        self
    }

    /// Set raw args bytes; they are stored exactly as given
    pub fn with_args(mut self, args: impl Into<Vec<u8>>) -> Self {
        self.args = args.into();
        self
    }

    /// Encode `args` as JSON
    pub fn with_json_args<T: Serialize>(mut self, args: &T) -> crate::error::Result<Self> {
        self.args = serde_json::to_vec(args)?;
        Ok(self)
    }

    /// Storage identity, present only once the job has been persisted
    pub fn identity(&self) -> Option<JobId> {
        (self.id != 0).then_some(self.id)
    }

    pub fn is_persisted(&self) -> bool {
        self.identity().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_job_is_unset() {
        let job = Job::new("SendEmail");

        assert_eq!(job.job_type.as_str(), "SendEmail");
        assert_eq!(job.id, 0);
        assert_eq!(job.queue, "");
        assert_eq!(job.priority, 0);
        assert!(job.run_at.is_none());
        assert!(job.args.is_empty());
        assert_eq!(job.error_count, 0);
        assert!(job.last_error.is_none());
        assert!(job.identity().is_none());
        assert!(!job.is_persisted());
    }

    #[test]
    fn test_builder_sets_fields() {
        let run_at = Utc::now();
        let job = Job::new("SendEmail")
            .with_queue("mailers")
            .with_priority(5)
            .with_run_at(run_at)
            .with_args(r#"{"to":"a@b.c"}"#);

        assert_eq!(job.queue, "mailers");
        assert_eq!(job.priority, 5);
        assert_eq!(job.run_at, Some(run_at));
        assert_eq!(job.args, br#"{"to":"a@b.c"}"#.to_vec());
    }

    #[test]
    fn test_json_args() {
        let job = Job::new("Resize")
            .with_json_args(&json!({"width": 640}))
            .unwrap();

        let decoded: serde_json::Value = serde_json::from_slice(&job.args).unwrap();
        assert_eq!(decoded, json!({"width": 640}));
    }

    #[test]
    fn test_identity_after_persist() {
        let mut job = Job::new("Resize");
        job.id = 42;

        assert_eq!(job.identity(), Some(42));
        assert!(job.is_persisted());
    }
}
