//! Assistants API: threads, messages and runs.
//!
//! Every call carries the `OpenAI-Beta: assistants=v2` header.

use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{LlmClient, LlmError};

const ASSISTANTS_BETA: &str = "assistants=v2";

#[derive(Debug, Clone, Deserialize)]
pub struct Thread {
    pub id: String,
}

/// Upstream run status. Unrecognised values deserialize as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

/// Body of `GET /threads/{id}/messages`. Newest message first.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageList {
    pub data: Vec<ThreadMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    pub role: String,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub value: String,
}

impl LlmClient {
    fn assistants_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, path)
            .header("OpenAI-Beta", ASSISTANTS_BETA)
    }

    pub async fn create_thread(&self) -> Result<Thread, LlmError> {
        self.send_json(self.assistants_request(Method::POST, "threads").json(&json!({})))
            .await
    }

    pub async fn post_message(&self, thread_id: &str, content: &str) -> Result<(), LlmError> {
        let request = self
            .assistants_request(Method::POST, &format!("threads/{thread_id}/messages"))
            .json(&json!({ "role": "user", "content": content }));
        self.send(request).await?;
        Ok(())
    }

    pub async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, LlmError> {
        let request = self
            .assistants_request(Method::POST, &format!("threads/{thread_id}/runs"))
            .json(&json!({ "assistant_id": assistant_id }));
        self.send_json(request).await
    }

    pub async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, LlmError> {
        let request =
            self.assistants_request(Method::GET, &format!("threads/{thread_id}/runs/{run_id}"));
        self.send_json(request).await
    }

    /// Returns the raw message-list body so callers can decide how strictly
    /// to interpret it.
    pub async fn list_messages_raw(&self, thread_id: &str) -> Result<String, LlmError> {
        let request =
            self.assistants_request(Method::GET, &format!("threads/{thread_id}/messages"));
        Ok(self.send(request).await?.text().await?)
    }

    pub async fn delete_thread(&self, thread_id: &str) -> Result<(), LlmError> {
        let request = self.assistants_request(Method::DELETE, &format!("threads/{thread_id}"));
        self.send(request).await?;
        Ok(())
    }
}
