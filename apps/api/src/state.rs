use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;
use crate::mentors::search::MentorDirectory;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable; each request builds its own upstream client from `config`.
#[derive(Clone)]
pub struct AppState {
    pub http: Client,
    pub config: Config,
    /// Assistant-backed by default. `USE_MENTOR_FIXTURES=true` swaps in the sample set.
    pub mentors: Arc<dyn MentorDirectory>,
}
