//! Email Draft: a personalised mentorship request written by the email assistant.
//!
//! Configuration is checked before any network activity; everything after
//! that is one assistant run whose reply is extracted as a single text value.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::config::{Config, ConfigMissing};
use crate::jobs::{AssistantJobBackend, JobBackend, JobError, JobPoller, JobRequest, PollSettings};
use crate::llm_client::LlmClient;
use crate::outreach::prompts::{DEFAULT_MENTOR_NAME, EMAIL_CONTEXT_TEMPLATE, NOT_SPECIFIED};
use crate::parsing::{parse_single_text, ReplyError};

/// Whatever the UI knows about the mentor. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorContext {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub expertise: Option<Vec<String>>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub lab_name: Option<String>,
    #[serde(default)]
    pub research_summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[serde(default)]
    pub mentor: MentorContext,
    #[serde(default)]
    pub student_goals: String,
    /// Plain text of the student's resume, already extracted from the upload.
    #[serde(default)]
    pub resume: Option<String>,
}

#[derive(Debug, Error)]
pub enum EmailError {
    #[error(transparent)]
    ConfigMissing(#[from] ConfigMissing),

    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Reply(#[from] ReplyError),
}

impl EmailError {
    pub fn kind(&self) -> &'static str {
        match self {
            EmailError::ConfigMissing(e) => e.kind(),
            EmailError::Job(e) => e.kind(),
            EmailError::Reply(e) => e.kind(),
        }
    }
}

/// `Some` with non-blank content, else `None`.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Builds the context block handed to the email assistant. Missing mentor
/// fields read "Not specified"; the resume line only appears when a resume
/// is supplied.
pub fn build_context_message(request: &EmailRequest) -> String {
    let mentor = &request.mentor;
    let expertise = mentor
        .expertise
        .as_ref()
        .filter(|e| !e.is_empty())
        .map(|e| e.join(", "));

    let message = EMAIL_CONTEXT_TEMPLATE
        .replace(
            "{name}",
            present(mentor.name.as_deref()).unwrap_or(DEFAULT_MENTOR_NAME),
        )
        .replace(
            "{institution}",
            present(mentor.institution.as_deref()).unwrap_or(NOT_SPECIFIED),
        )
        .replace("{expertise}", expertise.as_deref().unwrap_or(NOT_SPECIFIED))
        .replace(
            "{summary}",
            present(mentor.research_summary.as_deref()).unwrap_or(NOT_SPECIFIED),
        )
        .replace(
            "{lab}",
            present(mentor.lab_name.as_deref()).unwrap_or(NOT_SPECIFIED),
        )
        .replace(
            "{goals}",
            present(Some(request.student_goals.as_str())).unwrap_or(NOT_SPECIFIED),
        );

    match present(request.resume.as_deref()) {
        Some(resume) => message.replace("{resume_line}", &format!("- Resume: {resume}")),
        None => message.replace("{resume_line}\n", ""),
    }
}

/// Drafts the email against an arbitrary job backend.
pub async fn draft_with_backend(
    backend: &dyn JobBackend,
    assistant_id: &str,
    poll: PollSettings,
    request: &EmailRequest,
    cancel: &CancellationToken,
) -> Result<String, EmailError> {
    let job = JobRequest {
        assistant_id: assistant_id.to_string(),
        content: build_context_message(request),
    };

    let raw = JobPoller::new(backend, poll)
        .submit_and_await(&job, cancel)
        .await?;

    Ok(parse_single_text(&raw)?)
}

/// Generates the email through the configured email assistant.
///
/// Fails with `ConfigMissing` before touching the network when the email
/// assistant's key or id is absent.
pub async fn generate_email(
    http: &Client,
    config: &Config,
    request: &EmailRequest,
    cancel: &CancellationToken,
) -> Result<String, EmailError> {
    let credentials = config.email_assistant.require()?;
    let backend = AssistantJobBackend::new(LlmClient::new(
        http.clone(),
        config.openai_base_url.as_str(),
        credentials.api_key,
    ));

    let span = tracing::info_span!("email_draft", draft_id = %Uuid::new_v4());
    async {
        let email =
            draft_with_backend(&backend, credentials.assistant_id, config.poll, request, cancel)
                .await?;
        info!("Email drafted ({} chars)", email.len());
        Ok::<_, EmailError>(email)
    }
    .instrument(span)
    .await
}
