use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::run_detached;
use crate::mentors::models::{MentorRecord, SearchCriteria};
use crate::mentors::pagination::{paginate, Page, DEFAULT_PAGE_SIZE};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(flatten)]
    pub criteria: SearchCriteria,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total: usize,
    pub mentors: Vec<MentorRecord>,
    pub page: Page<MentorRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub mentors: Vec<MentorRecord>,
    #[serde(default)]
    pub page_index: usize,
    pub page_size: Option<usize>,
}

fn page_size(requested: Option<usize>) -> Result<usize, AppError> {
    match requested {
        Some(0) => Err(AppError::Validation("pageSize must be at least 1".to_string())),
        Some(size) => Ok(size),
        None => Ok(DEFAULT_PAGE_SIZE),
    }
}

/// POST /api/v1/mentors/search
/// Always 200: a failed search is an empty list.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let size = page_size(req.page_size)?;

    // A client disconnect cancels the search; its task still cleans up upstream.
    let directory = state.mentors.clone();
    let criteria = req.criteria;
    let mentors = run_detached(move |cancel| async move {
        directory.search(&criteria, &cancel).await
    })
    .await
    .map_err(anyhow::Error::from)?;
    let page = paginate(&mentors, 0, size);

    Ok(Json(SearchResponse {
        total: mentors.len(),
        mentors,
        page,
    }))
}

/// POST /api/v1/mentors/page
pub async fn handle_page(
    Json(req): Json<PageRequest>,
) -> Result<Json<Page<MentorRecord>>, AppError> {
    let size = page_size(req.page_size)?;
    Ok(Json(paginate(&req.mentors, req.page_index, size)))
}
