//! Response Parser: turns raw model output into typed records.
//!
//! Two policies live here. `parse_mentors` fails closed: a bad reply becomes
//! an empty list and a log line. `parse_single_text` returns a distinguishable
//! error, for callers that must tell the user what went wrong.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::assistants::{MessageContent, MessageList};
use crate::llm_client::strip_json_fences;
use crate::mentors::models::MentorRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("No response generated")]
    NoResponse,

    #[error("Invalid response format")]
    InvalidFormat,

    #[error("Empty response generated")]
    Empty,
}

impl ReplyError {
    pub fn kind(&self) -> &'static str {
        match self {
            ReplyError::NoResponse => "no_response",
            ReplyError::InvalidFormat => "invalid_format",
            ReplyError::Empty => "empty",
        }
    }
}

/// Mentor as the model describes it. Deliberately has no relevance score or
/// location: both are derived locally and never read from the payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MentorPayload {
    name: String,
    title: String,
    institution: String,
    department: String,
    expertise: Vec<String>,
    profile_url: String,
    #[serde(default)]
    research_summary: Option<String>,
    #[serde(default)]
    lab_name: Option<String>,
    #[serde(default)]
    lab_description: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl From<MentorPayload> for MentorRecord {
    fn from(p: MentorPayload) -> Self {
        MentorRecord {
            name: p.name,
            title: p.title,
            institution: p.institution,
            department: p.department,
            expertise: p.expertise,
            profile_url: p.profile_url,
            relevance_score: 0.0,
            location: String::new(),
            research_summary: p.research_summary,
            lab_name: p.lab_name,
            lab_description: p.lab_description,
            email: p.email,
        }
    }
}

/// Parses a JSON array of mentors. Never fails: any syntax or schema error
/// yields an empty list. Returned records carry a zero score and an empty
/// location until the search workflow fills them in.
pub fn parse_mentors(raw_text: &str) -> Vec<MentorRecord> {
    match serde_json::from_str::<Vec<MentorPayload>>(strip_json_fences(raw_text)) {
        Ok(payloads) => payloads.into_iter().map(MentorRecord::from).collect(),
        Err(e) => {
            warn!(kind = "malformed_json", "Discarding unparseable mentor reply: {e}");
            Vec::new()
        }
    }
}

/// Extracts the assistant's text from a raw thread message list.
///
/// Takes the first message attributed to the assistant (the list is newest
/// first), then its first text part, trimmed.
pub fn parse_single_text(raw_response: &str) -> Result<String, ReplyError> {
    let list: MessageList =
        serde_json::from_str(raw_response).map_err(|_| ReplyError::InvalidFormat)?;

    let message = list
        .data
        .iter()
        .find(|m| m.role == "assistant")
        .ok_or(ReplyError::NoResponse)?;

    let text = message
        .content
        .iter()
        .find_map(|part| match part {
            MessageContent::Text { text } => Some(text.value.trim()),
            MessageContent::Other => None,
        })
        .ok_or(ReplyError::InvalidFormat)?;

    if text.is_empty() {
        return Err(ReplyError::Empty);
    }

    Ok(text.to_string())
}
