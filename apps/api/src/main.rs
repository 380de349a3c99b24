mod config;
mod errors;
mod jobs;
mod llm_client;
mod mentors;
mod outreach;
mod parsing;
mod projects;
mod routes;
mod state;
mod uploads;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::build_http_client;
use crate::mentors::fixtures::FixtureMentorDirectory;
use crate::mentors::search::{AssistantMentorDirectory, MentorDirectory};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values; credentials are checked per request)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting STEMLink API v{}", env!("CARGO_PKG_VERSION"));

    let http = build_http_client()?;
    info!("Upstream LLM API: {}", config.openai_base_url);

    let mentors: Arc<dyn MentorDirectory> = if config.use_mentor_fixtures {
        Arc::new(FixtureMentorDirectory::new())
    } else {
        Arc::new(AssistantMentorDirectory::new(http.clone(), &config))
    };
    info!("Mentor directory: {}", mentors.backend_name());

    if config.mentor_assistant.require().is_err() && !config.use_mentor_fixtures {
        warn!("Mentor assistant is not configured; searches will return no results");
    }
    if config.email_assistant.require().is_err() {
        warn!("Email assistant is not configured; email drafting will fail");
    }

    // Build app state
    let state = AppState {
        http,
        config: config.clone(),
        mentors,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
