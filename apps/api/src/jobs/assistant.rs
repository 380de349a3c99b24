use async_trait::async_trait;
use tracing::debug;

use super::{AsyncJob, JobBackend, JobError, JobHandle, JobRequest, JobStatus};
use crate::llm_client::assistants::RunStatus;
use crate::llm_client::LlmClient;

impl From<RunStatus> for JobStatus {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Queued => JobStatus::Queued,
            RunStatus::InProgress
            | RunStatus::RequiresAction
            | RunStatus::Cancelling
            | RunStatus::Unknown => JobStatus::Running,
            RunStatus::Completed => JobStatus::Completed,
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Incomplete => JobStatus::Failed,
            RunStatus::Expired => JobStatus::Expired,
        }
    }
}

/// Runs jobs as Assistants API runs: one fresh thread per job.
pub struct AssistantJobBackend {
    client: LlmClient,
}

impl AssistantJobBackend {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobBackend for AssistantJobBackend {
    async fn submit(&self, request: &JobRequest) -> Result<JobHandle, JobError> {
        let thread = self.client.create_thread().await?;
        self.client.post_message(&thread.id, &request.content).await?;
        let run = self
            .client
            .create_run(&thread.id, &request.assistant_id)
            .await?;

        debug!(thread_id = %thread.id, run_id = %run.id, "Assistant run created");

        Ok(JobHandle {
            thread_id: thread.id,
            run_id: run.id,
        })
    }

    async fn poll(&self, handle: &JobHandle) -> Result<AsyncJob, JobError> {
        let run = self
            .client
            .retrieve_run(&handle.thread_id, &handle.run_id)
            .await?;
        let status = JobStatus::from(run.status);

        if let Some(err) = &run.last_error {
            debug!(run_id = %run.id, code = ?err.code, "Run reported an error: {}", err.message);
        }

        let result = if status == JobStatus::Completed {
            Some(self.client.list_messages_raw(&handle.thread_id).await?)
        } else {
            None
        };

        Ok(AsyncJob {
            id: handle.clone(),
            status,
            result,
            last_error: run.last_error.map(|e| e.message),
        })
    }

    async fn release(&self, handle: &JobHandle) -> Result<(), JobError> {
        self.client.delete_thread(&handle.thread_id).await?;
        Ok(())
    }
}
