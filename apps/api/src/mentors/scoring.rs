//! Relevance scoring: local keyword-overlap heuristic, never model-provided.
//!
//! Keywords come from the student's interests: lowercased, split on commas
//! and whitespace. A keyword counts as matched when it appears anywhere in
//! the lowercased text as a substring, so short keywords over-match
//! ("ai" is found inside "against"). That behaviour is kept on purpose.

use crate::mentors::models::MentorRecord;

/// Splits free-text interests into lowercase keywords. Empty fragments
/// produced by repeated separators are dropped.
pub fn extract_keywords(interests: &str) -> Vec<String> {
    interests
        .to_lowercase()
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fraction of `keywords` found in `text`, in [0, 1]. No keywords scores 0.
pub fn relevance_score(text: &str, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let text_lower = text.to_lowercase();
    let matches = keywords
        .iter()
        .filter(|k| text_lower.contains(k.as_str()))
        .count();

    matches as f64 / keywords.len() as f64
}

/// Scores a mentor's expertise and research summary against the interests.
pub fn mentor_relevance(mentor: &MentorRecord, interests: &str) -> f64 {
    let text = format!(
        "{} {}",
        mentor.expertise.join(" "),
        mentor.research_summary.as_deref().unwrap_or("")
    );
    relevance_score(&text, &extract_keywords(interests))
}
