//! Async jobs: submit work to an upstream assistant and wait for it to settle.
//!
//! A job moves `Queued → Running → {Completed | Failed | Expired}`. The poller
//! adds two derived terminal transitions of its own: `Timeout` once the
//! configured ceiling elapses, and `Cancelled` when the caller's token fires.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::LlmError;

mod assistant;
mod poller;

pub use assistant::AssistantJobBackend;
pub use poller::{run_detached, JobPoller, PollSettings};

/// What to run: the assistant to invoke and the user message it receives.
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub assistant_id: String,
    pub content: String,
}

/// Identifies one run on one conversation thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub thread_id: String,
    pub run_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Expired,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Expired)
    }
}

/// Snapshot of a job as seen by one poll.
/// `result` is only populated once the job is `Completed`.
#[derive(Debug, Clone)]
pub struct AsyncJob {
    pub id: JobHandle,
    pub status: JobStatus,
    pub result: Option<String>,
    pub last_error: Option<String>,
}

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Job timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Run failed: {0}")]
    Failed(String),

    #[error("Run expired")]
    Expired,

    #[error("Job cancelled")]
    Cancelled,

    #[error("Run completed without a result")]
    MissingResult,

    #[error("Request failed: {0}")]
    Request(#[from] LlmError),
}

impl JobError {
    pub fn kind(&self) -> &'static str {
        match self {
            JobError::Timeout(_) => "timeout",
            JobError::Failed(_) => "job_failed",
            JobError::Expired => "job_expired",
            JobError::Cancelled => "cancelled",
            JobError::MissingResult => "invalid_format",
            JobError::Request(e) => e.kind(),
        }
    }
}

/// The upstream side of a job. `AssistantJobBackend` talks to the Assistants
/// API; tests substitute scripted backends.
#[async_trait]
pub trait JobBackend: Send + Sync {
    async fn submit(&self, request: &JobRequest) -> Result<JobHandle, JobError>;

    async fn poll(&self, handle: &JobHandle) -> Result<AsyncJob, JobError>;

    /// Frees upstream resources held by a finished job.
    async fn release(&self, _handle: &JobHandle) -> Result<(), JobError> {
        Ok(())
    }
}
