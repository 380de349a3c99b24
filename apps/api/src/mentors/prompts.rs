// Prompt text for the mentor search assistant.
// The assistant is pre-registered upstream with its own instructions to
// answer with a JSON array of mentors; only the query is sent per search.

/// Replace: {interests}, {location}, {radius}
pub const MENTOR_QUERY_TEMPLATE: &str =
    "Find professors researching {interests} near {location} within {radius}.";
