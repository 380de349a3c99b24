pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::mentors::handlers as mentors;
use crate::outreach::handlers as outreach;
use crate::projects::handlers as projects;
use crate::state::AppState;
use crate::uploads;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Mentor discovery
        .route("/api/v1/mentors/search", post(mentors::handle_search))
        .route("/api/v1/mentors/page", post(mentors::handle_page))
        // Outreach
        .route(
            "/api/v1/outreach/email",
            post(outreach::handle_generate_email),
        )
        .route("/api/v1/outreach/template", post(outreach::handle_template))
        // Project ideas
        .route(
            "/api/v1/projects/generate",
            post(projects::handle_generate_project),
        )
        .route(
            "/api/v1/uploads/resume",
            post(uploads::handle_resume_upload),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::mentors::fixtures::{sample_mentors, FixtureMentorDirectory};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState {
            http: reqwest::Client::new(),
            config: Config::default(),
            mentors: Arc::new(FixtureMentorDirectory::new()),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health_reports_mentor_source() {
        let (status, body) =
            send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["mentorDirectory"], "fixture");
    }

    #[tokio::test]
    async fn test_search_returns_first_page() {
        let (status, body) = send(post_json(
            "/api/v1/mentors/search",
            json!({
                "researchInterests": "quantum",
                "location": "Cambridge",
                "searchRadius": "50"
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["mentors"][0]["name"], "Dr. Michael Chen");
        assert_eq!(body["mentors"][0]["location"], "Cambridge");
        assert_eq!(body["page"]["pageIndex"], 0);
        assert_eq!(body["page"]["pageSize"], 5);
        assert_eq!(body["page"]["hasNext"], false);
        assert_eq!(body["page"]["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_without_matches_is_empty_ok() {
        let (status, body) = send(post_json(
            "/api/v1/mentors/search",
            json!({ "researchInterests": "marine biology", "location": "Miami" }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
        assert_eq!(body["page"]["totalPages"], 0);
    }

    #[tokio::test]
    async fn test_page_slices_client_list() {
        let mentors = sample_mentors();
        let (status, body) = send(post_json(
            "/api/v1/mentors/page",
            json!({ "mentors": mentors, "pageIndex": 1, "pageSize": 1 }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"][0]["name"], "Dr. Michael Chen");
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["hasNext"], false);
        assert_eq!(body["hasPrevious"], true);
    }

    #[tokio::test]
    async fn test_page_rejects_zero_page_size() {
        let (status, body) = send(post_json(
            "/api/v1/mentors/page",
            json!({ "mentors": [], "pageIndex": 0, "pageSize": 0 }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_email_without_config_is_service_unavailable() {
        let (status, body) = send(post_json(
            "/api/v1/outreach/email",
            json!({ "mentor": { "name": "Dr. Chen" }, "studentGoals": "learn qubits" }),
        ))
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "CONFIG_MISSING");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to generate email"));
    }

    #[tokio::test]
    async fn test_template_renders_letter() {
        let mentor = sample_mentors().remove(1);
        let (status, body) = send(post_json(
            "/api/v1/outreach/template",
            json!({ "mentor": mentor, "studentGoals": "I love qubits." }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let email = body["email"].as_str().unwrap();
        assert!(email.starts_with("Dear Dr. Michael Chen,"));
        assert!(email.contains("I love qubits."));
    }

    #[tokio::test]
    async fn test_project_without_key_is_service_unavailable() {
        let (status, body) = send(post_json(
            "/api/v1/projects/generate",
            json!({ "interests": "volcanoes", "gradeLevel": "8", "fieldOfStudy": "geology" }),
        ))
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "CONFIG_MISSING");
    }

    #[tokio::test]
    async fn test_project_with_blank_interests_is_bad_request() {
        let (status, _) = send(post_json(
            "/api/v1/projects/generate",
            json!({ "interests": "  ", "gradeLevel": "8", "fieldOfStudy": "geology" }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    fn multipart(field: &str, filename: &str, content: &str) -> Request<Body> {
        let boundary = "stemlink-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );
        Request::post("/api/v1/uploads/resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_extracts_text() {
        let (status, body) =
            send(multipart("file", "resume.txt", "Science olympiad finalist")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filename"], "resume.txt");
        assert_eq!(body["text"], "Science olympiad finalist");
    }

    #[tokio::test]
    async fn test_upload_blank_file_is_unprocessable() {
        let (status, body) = send(multipart("file", "resume.txt", "   ")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_bad_request() {
        let (status, _) = send(multipart("other", "resume.txt", "text")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
