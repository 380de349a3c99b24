use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::run_detached;
use crate::mentors::models::MentorRecord;
use crate::outreach::email::{generate_email, EmailRequest};
use crate::outreach::template::render_letter;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailResponse {
    pub email: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    pub mentor: MentorRecord,
    #[serde(default)]
    pub student_goals: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub email: String,
}

/// POST /api/v1/outreach/email
pub async fn handle_generate_email(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    let email = run_detached(move |cancel| async move {
        generate_email(&state.http, &state.config, &req, &cancel).await
    })
    .await
    .map_err(anyhow::Error::from)??;
    Ok(Json(EmailResponse {
        email,
        generated_at: Utc::now(),
    }))
}

/// POST /api/v1/outreach/template
pub async fn handle_template(Json(req): Json<TemplateRequest>) -> Json<TemplateResponse> {
    Json(TemplateResponse {
        email: render_letter(&req.mentor, &req.student_goals),
    })
}
