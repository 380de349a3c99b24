use std::fmt;

use serde::{Deserialize, Serialize};

/// How far from `location` the student is willing to look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchRadius {
    #[default]
    #[serde(rename = "25")]
    Miles25,
    #[serde(rename = "50")]
    Miles50,
    #[serde(rename = "100")]
    Miles100,
    #[serde(rename = "anywhere")]
    Anywhere,
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchRadius::Miles25 => f.write_str("a 25 mile radius"),
            SearchRadius::Miles50 => f.write_str("a 50 mile radius"),
            SearchRadius::Miles100 => f.write_str("a 100 mile radius"),
            SearchRadius::Anywhere => f.write_str("any distance"),
        }
    }
}

/// Immutable input to one mentor search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub research_interests: String,
    pub location: String,
    #[serde(default)]
    pub search_radius: SearchRadius,
}

/// A potential research mentor.
///
/// `relevance_score` and `location` are always filled in locally by the
/// search workflow; see `parsing::parse_mentors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorRecord {
    pub name: String,
    pub title: String,
    pub institution: String,
    pub department: String,
    pub expertise: Vec<String>,
    pub profile_url: String,
    /// 0.0 – 1.0
    pub relevance_score: f64,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
