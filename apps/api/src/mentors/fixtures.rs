//! Bundled sample mentors for local demos without upstream credentials.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::mentors::models::{MentorRecord, SearchCriteria};
use crate::mentors::search::{score_and_locate, MentorDirectory};

#[allow(clippy::too_many_arguments)]
fn mentor(
    name: &str,
    title: &str,
    institution: &str,
    department: &str,
    expertise: &[&str],
    email: &str,
    research_summary: &str,
    lab: (&str, &str),
    profile_url: &str,
) -> MentorRecord {
    MentorRecord {
        name: name.to_string(),
        title: title.to_string(),
        institution: institution.to_string(),
        department: department.to_string(),
        expertise: expertise.iter().map(|e| e.to_string()).collect(),
        profile_url: profile_url.to_string(),
        relevance_score: 0.0,
        location: String::new(),
        research_summary: Some(research_summary.to_string()),
        lab_name: Some(lab.0.to_string()),
        lab_description: Some(lab.1.to_string()),
        email: Some(email.to_string()),
    }
}

pub fn sample_mentors() -> Vec<MentorRecord> {
    vec![
        mentor(
            "Dr. Sarah Johnson",
            "Associate Professor",
            "Stanford University",
            "Computer Science",
            &["Machine Learning", "Artificial Intelligence", "Computer Vision"],
            "sarah.johnson@stanford.edu",
            "Focusing on advanced machine learning algorithms and their applications in computer vision.",
            (
                "AI & Vision Lab",
                "Research group exploring cutting-edge AI applications.",
            ),
            "https://stanford.edu/faculty/sjohnson",
        ),
        mentor(
            "Dr. Michael Chen",
            "Assistant Professor",
            "MIT",
            "Physics",
            &["Quantum Computing", "Theoretical Physics", "Mathematics"],
            "mchen@mit.edu",
            "Working on quantum algorithms and their implications for computational complexity.",
            (
                "Quantum Computing Group",
                "Advancing the frontiers of quantum computation.",
            ),
            "https://mit.edu/faculty/mchen",
        ),
    ]
}

/// Serves `sample_mentors()`, keeping those whose expertise contains the
/// whole interests string (case-insensitive).
pub struct FixtureMentorDirectory {
    mentors: Vec<MentorRecord>,
}

impl FixtureMentorDirectory {
    pub fn new() -> Self {
        Self {
            mentors: sample_mentors(),
        }
    }
}

impl Default for FixtureMentorDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MentorDirectory for FixtureMentorDirectory {
    async fn search(
        &self,
        criteria: &SearchCriteria,
        _cancel: &CancellationToken,
    ) -> Vec<MentorRecord> {
        let needle = criteria.research_interests.trim().to_lowercase();
        let matched: Vec<MentorRecord> = self
            .mentors
            .iter()
            .filter(|m| m.expertise.iter().any(|e| e.to_lowercase().contains(&needle)))
            .cloned()
            .collect();

        info!("Fixture mentor search matched {} mentors", matched.len());
        score_and_locate(matched, criteria)
    }

    fn backend_name(&self) -> &'static str {
        "fixture"
    }
}
