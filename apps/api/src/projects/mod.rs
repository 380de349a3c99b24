// Science fair project idea generation.
// Single-shot chat completion; all LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
