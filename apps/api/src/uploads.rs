//! Resume upload: turns an uploaded file into plain text for the email prompt.

use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Could not read {filename}: {reason}")]
    Unreadable { filename: String, reason: String },

    #[error("No text could be extracted from {0}")]
    Empty(String),
}

impl UploadError {
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::Unreadable { .. } => "unreadable",
            UploadError::Empty(_) => "empty",
        }
    }
}

fn is_pdf(filename: &str, content_type: Option<&str>) -> bool {
    content_type == Some("application/pdf") || filename.to_ascii_lowercase().ends_with(".pdf")
}

/// PDFs are decoded with `pdf-extract`; anything else must be UTF-8 text.
pub fn extract_text(
    filename: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, UploadError> {
    let unreadable = |reason: String| UploadError::Unreadable {
        filename: filename.to_string(),
        reason,
    };

    let text = if is_pdf(filename, content_type) {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| unreadable(e.to_string()))?
    } else {
        String::from_utf8(bytes.to_vec()).map_err(|e| unreadable(e.to_string()))?
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(UploadError::Empty(filename.to_string()));
    }
    Ok(text.to_string())
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub text: String,
}

/// POST /api/v1/uploads/resume
pub async fn handle_resume_upload(
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let text = extract_text(&filename, content_type.as_deref(), &bytes)?;
        info!("Extracted {} chars from {filename}", text.len());
        return Ok(Json(UploadResponse { filename, text }));
    }

    Err(AppError::Validation("Missing 'file' field".to_string()))
}
