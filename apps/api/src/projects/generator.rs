//! Project idea generation: one chat completion parsed into a `ProjectIdea`.
//!
//! Single-shot: the chat endpoint answers synchronously, so there is no
//! polling. A reply that is not a well-formed idea is an error for the
//! caller, not an empty result.

use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, ConfigMissing};
use crate::llm_client::{strip_json_fences, LlmClient, LlmError};
use crate::projects::models::{ProjectFormData, ProjectIdea};
use crate::projects::prompts::{PROJECT_PROMPT_TEMPLATE, PROJECT_SYSTEM};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(transparent)]
    ConfigMissing(#[from] ConfigMissing),

    #[error("Request failed: {0}")]
    Request(#[from] LlmError),

    #[error("Model reply was not a valid project idea: {0}")]
    MalformedJson(#[source] serde_json::Error),
}

impl ProjectError {
    pub fn kind(&self) -> &'static str {
        match self {
            ProjectError::ConfigMissing(e) => e.kind(),
            ProjectError::Request(e) => e.kind(),
            ProjectError::MalformedJson(_) => "malformed_json",
        }
    }
}

pub fn build_prompt(form: &ProjectFormData) -> String {
    PROJECT_PROMPT_TEMPLATE
        .replace("{interests}", &form.interests)
        .replace("{grade_level}", &form.grade_level)
        .replace("{field_of_study}", &form.field_of_study)
        .replace("{resources}", &form.resources.available().join(", "))
}

/// Parses the model's reply, tolerating markdown code fences.
pub fn parse_project_idea(reply: &str) -> Result<ProjectIdea, ProjectError> {
    serde_json::from_str(strip_json_fences(reply)).map_err(ProjectError::MalformedJson)
}

pub async fn generate_with_client(
    llm: &LlmClient,
    form: &ProjectFormData,
) -> Result<ProjectIdea, ProjectError> {
    let reply = llm.chat_text(PROJECT_SYSTEM, &build_prompt(form)).await?;

    let idea = parse_project_idea(&reply).inspect_err(|e| {
        warn!(kind = e.kind(), "Project idea reply could not be parsed: {e}");
    })?;

    info!("Generated project idea: {}", idea.title);
    Ok(idea)
}

/// Generates a project idea with the main OpenAI credential.
pub async fn generate_project_idea(
    http: &Client,
    config: &Config,
    form: &ProjectFormData,
) -> Result<ProjectIdea, ProjectError> {
    let api_key = config
        .openai_api_key
        .as_deref()
        .ok_or(ConfigMissing::ApiKey)?;
    let llm = LlmClient::new(http.clone(), config.openai_base_url.as_str(), api_key);

    generate_with_client(&llm, form).await
}
