//! Mentor Search: find mentors matching a student's interests near a location.
//!
//! Flow: validate config → build query → assistant run (poll) → extract reply
//!       text → parse mentors → recompute relevance → attach query location.
//!
//! Searching is best-effort: every failure is logged with its kind and the
//! caller receives an empty list.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::config::{AssistantConfig, Config, ConfigMissing};
use crate::jobs::{AssistantJobBackend, JobBackend, JobError, JobPoller, JobRequest, PollSettings};
use crate::llm_client::LlmClient;
use crate::mentors::models::{MentorRecord, SearchCriteria};
use crate::mentors::prompts::MENTOR_QUERY_TEMPLATE;
use crate::mentors::scoring::mentor_relevance;
use crate::parsing::{parse_mentors, parse_single_text, ReplyError};

/// A source of mentors. Carried in `AppState` as `Arc<dyn MentorDirectory>`
/// so the live assistant and the bundled fixtures are interchangeable.
#[async_trait]
pub trait MentorDirectory: Send + Sync {
    /// Never fails; degraded searches return an empty list.
    async fn search(
        &self,
        criteria: &SearchCriteria,
        cancel: &CancellationToken,
    ) -> Vec<MentorRecord>;

    /// "assistant" | "fixture", for logs.
    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Error)]
enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigMissing),

    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Reply(#[from] ReplyError),
}

impl SearchError {
    fn kind(&self) -> &'static str {
        match self {
            SearchError::Config(e) => e.kind(),
            SearchError::Job(e) => e.kind(),
            SearchError::Reply(e) => e.kind(),
        }
    }
}

/// Natural-language query sent to the mentor assistant.
pub fn build_query(criteria: &SearchCriteria) -> String {
    MENTOR_QUERY_TEMPLATE
        .replace("{interests}", &criteria.research_interests)
        .replace("{location}", &criteria.location)
        .replace("{radius}", &criteria.search_radius.to_string())
}

/// Recomputes every record's relevance against the query and stamps the
/// query's location on it.
pub fn score_and_locate(
    mentors: Vec<MentorRecord>,
    criteria: &SearchCriteria,
) -> Vec<MentorRecord> {
    mentors
        .into_iter()
        .map(|mut mentor| {
            mentor.relevance_score = mentor_relevance(&mentor, &criteria.research_interests);
            mentor.location = criteria.location.clone();
            mentor
        })
        .collect()
}

/// Runs one search against an arbitrary job backend.
async fn run_search(
    backend: &dyn JobBackend,
    assistant_id: &str,
    poll: PollSettings,
    criteria: &SearchCriteria,
    cancel: &CancellationToken,
) -> Result<Vec<MentorRecord>, SearchError> {
    let request = JobRequest {
        assistant_id: assistant_id.to_string(),
        content: build_query(criteria),
    };

    let raw = JobPoller::new(backend, poll)
        .submit_and_await(&request, cancel)
        .await?;
    let text = parse_single_text(&raw)?;

    Ok(score_and_locate(parse_mentors(&text), criteria))
}

/// Searches through the mentor assistant registered upstream.
pub struct AssistantMentorDirectory {
    http: Client,
    base_url: String,
    assistant: AssistantConfig,
    poll: PollSettings,
}

impl AssistantMentorDirectory {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.openai_base_url.clone(),
            assistant: config.mentor_assistant.clone(),
            poll: config.poll,
        }
    }

    async fn try_search(
        &self,
        criteria: &SearchCriteria,
        cancel: &CancellationToken,
    ) -> Result<Vec<MentorRecord>, SearchError> {
        let credentials = self.assistant.require()?;
        let backend = AssistantJobBackend::new(LlmClient::new(
            self.http.clone(),
            self.base_url.as_str(),
            credentials.api_key,
        ));
        run_search(&backend, credentials.assistant_id, self.poll, criteria, cancel).await
    }
}

#[async_trait]
impl MentorDirectory for AssistantMentorDirectory {
    async fn search(
        &self,
        criteria: &SearchCriteria,
        cancel: &CancellationToken,
    ) -> Vec<MentorRecord> {
        let span = tracing::info_span!("mentor_search", search_id = %Uuid::new_v4());

        async {
            match self.try_search(criteria, cancel).await {
                Ok(mentors) => {
                    info!("Mentor search returned {} mentors", mentors.len());
                    mentors
                }
                Err(e) => {
                    warn!(kind = e.kind(), "Mentor search failed: {e}");
                    Vec::new()
                }
            }
        }
        .instrument(span)
        .await
    }

    fn backend_name(&self) -> &'static str {
        "assistant"
    }
}
