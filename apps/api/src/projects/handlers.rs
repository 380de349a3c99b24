use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::projects::generator::generate_project_idea;
use crate::projects::models::{ProjectFormData, ProjectIdea};
use crate::state::AppState;

/// POST /api/v1/projects/generate
pub async fn handle_generate_project(
    State(state): State<AppState>,
    Json(form): Json<ProjectFormData>,
) -> Result<Json<ProjectIdea>, AppError> {
    if form.interests.trim().is_empty() {
        return Err(AppError::Validation("interests must not be empty".to_string()));
    }
    let idea = generate_project_idea(&state.http, &state.config, &form).await?;
    Ok(Json(idea))
}
