use std::time::Duration;

use anyhow::{ensure, Context, Result};
use thiserror::Error;

use crate::jobs::PollSettings;
use crate::llm_client::DEFAULT_BASE_URL;

/// Upper bound on `POLL_TIMEOUT_SECS`: one day.
const MAX_POLL_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// A credential or identifier required by a workflow is absent.
/// Raised before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigMissing {
    #[error("OpenAI API key is not configured")]
    ApiKey,

    #[error("OpenAI assistant ID is not configured")]
    AssistantId,
}

impl ConfigMissing {
    pub fn kind(&self) -> &'static str {
        "config_missing"
    }
}

/// Credential pair for one pre-registered assistant.
/// Either half may be absent at startup; workflows validate at first use.
#[derive(Debug, Clone, Default)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub assistant_id: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct AssistantCredentials<'a> {
    pub api_key: &'a str,
    pub assistant_id: &'a str,
}

impl AssistantConfig {
    pub fn require(&self) -> Result<AssistantCredentials<'_>, ConfigMissing> {
        let api_key = self.api_key.as_deref().ok_or(ConfigMissing::ApiKey)?;
        let assistant_id = self
            .assistant_id
            .as_deref()
            .ok_or(ConfigMissing::AssistantId)?;
        Ok(AssistantCredentials {
            api_key,
            assistant_id,
        })
    }
}

/// Application configuration loaded from environment variables.
/// Upstream credentials are optional here and checked by each workflow.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub openai_base_url: String,
    /// Used by the single-shot project idea workflow.
    pub openai_api_key: Option<String>,
    pub mentor_assistant: AssistantConfig,
    pub email_assistant: AssistantConfig,
    pub poll: PollSettings,
    /// Serve the bundled sample mentors instead of calling the assistant.
    pub use_mentor_fixtures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            openai_api_key: None,
            mentor_assistant: AssistantConfig::default(),
            email_assistant: AssistantConfig::default(),
            poll: PollSettings::default(),
            use_mentor_fixtures: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let openai_api_key = get("OPENAI_API_KEY");

        let poll = PollSettings {
            interval: get("POLL_INTERVAL_MS")
                .map(|v| v.parse::<u64>().map(Duration::from_millis))
                .transpose()
                .context("POLL_INTERVAL_MS must be a whole number of milliseconds")?
                .unwrap_or(defaults.poll.interval),
            timeout: get("POLL_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>().map(Duration::from_secs))
                .transpose()
                .context("POLL_TIMEOUT_SECS must be a whole number of seconds")?
                .unwrap_or(defaults.poll.timeout),
        };
        ensure!(!poll.interval.is_zero(), "POLL_INTERVAL_MS must be at least 1");
        ensure!(
            poll.timeout <= MAX_POLL_TIMEOUT,
            "POLL_TIMEOUT_SECS must not exceed {}",
            MAX_POLL_TIMEOUT.as_secs()
        );

        Ok(Config {
            port: get("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(defaults.port),
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            mentor_assistant: AssistantConfig {
                api_key: openai_api_key.clone(),
                assistant_id: get("OPENAI_ASSISTANT_ID"),
            },
            openai_api_key,
            email_assistant: AssistantConfig {
                api_key: get("RESEARCH_EMAIL_API_KEY"),
                assistant_id: get("RESEARCH_EMAIL_ASSISTANT_ID"),
            },
            poll,
            use_mentor_fixtures: get("USE_MENTOR_FIXTURES")
                .map(|v| v.parse::<bool>())
                .transpose()
                .context("USE_MENTOR_FIXTURES must be 'true' or 'false'")?
                .unwrap_or(defaults.use_mentor_fixtures),
        })
    }
}
