// Mentor discovery: assistant-backed search, local relevance scoring
// and pagination over the fetched list.

pub mod fixtures;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod prompts;
pub mod scoring;
pub mod search;
