//! Shared fixtures for tests that talk to a mocked upstream.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts the full assistants flow; the assistant replies with `reply`.
pub async fn mount_assistant(server: &MockServer, run_status: &str, reply: &str) {
    Mock::given(method("POST"))
        .and(path("/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "thread_1" })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_1" })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/runs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "run_1", "status": "queued" })),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/runs/run_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "run_1", "status": run_status })),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "role": "assistant",
                "content": [{ "type": "text", "text": { "value": reply, "annotations": [] } }]
            }]
        })))
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/threads/thread_1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "thread_1", "deleted": true })),
        )
        .mount(server)
        .await;
}
