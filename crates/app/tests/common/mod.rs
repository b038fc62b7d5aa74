//! In-process mock of the storyboard server for store tests.
//!
//! Routes are canned per `(method, path)` with an optional delay, so tests
//! can hold one project's responses back while another completes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: Value,
    delay: Duration,
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<Mutex<HashMap<(String, String), Canned>>>,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockBackend {
    pub url: String,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(serve).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    pub fn ok(&self, method: &str, path: &str, body: Value) {
        self.respond_after(method, path, 200, body, Duration::ZERO);
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.respond_after(method, path, status, body, Duration::ZERO);
    }

    /// Serve `body` only after `delay` has elapsed.
    pub fn respond_after(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: Value,
        delay: Duration,
    ) {
        let canned = Canned {
            status: StatusCode::from_u16(status).expect("valid status"),
            body,
            delay,
        };
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), canned);
    }

    /// Serve one project's script, events and asset items.
    pub fn project(&self, project_id: i64, delay: Duration) {
        self.respond_after(
            "GET",
            &format!("/storyboard/project/{project_id}"),
            200,
            script_json(project_id),
            delay,
        );
        self.respond_after(
            "GET",
            &format!("/events/project/{project_id}"),
            200,
            json!([{ "id": project_id * 100, "name": format!("event-{project_id}"), "nodes": [] }]),
            delay,
        );
        self.respond_after(
            "GET",
            &format!("/projects/{project_id}/asset-items"),
            200,
            json!([{ "id": project_id * 1000, "name": format!("hero-{project_id}"), "category": "persona" }]),
            delay,
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.log.lock().unwrap().clone()
    }

    /// `"METHOD path?query"` for each request, in arrival order.
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| match r.query {
                Some(q) => format!("{} {}?{}", r.method, r.path, q),
                None => format!("{} {}", r.method, r.path),
            })
            .collect()
    }
}

/// A one-episode script tree whose ids are derived from `project_id`:
/// episode `p*10`, scene `p*20`, shot `p*30`.
pub fn script_json(project_id: i64) -> Value {
    json!([{
        "id": project_id * 10,
        "title": format!("Episode of {project_id}"),
        "order": 0,
        "scenes": [{
            "id": project_id * 20,
            "title": "Opening",
            "shots": [{
                "id": project_id * 30,
                "sequence_number": 1,
                "title": "Wide",
                "action_text": "old",
                "dialogue": "old line",
                "status": "draft",
                "assets": [{
                    "id": 7,
                    "file_path": "Demo/a.png",
                    "file_type": "image",
                    "created_at": "2024-05-01T10:00:00"
                }]
            }]
        }]
    }])
}

async fn serve(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body: body.to_vec(),
    };
    let key = (request.method.clone(), request.path.clone());
    state.log.lock().unwrap().push(request);

    let canned = state.routes.lock().unwrap().get(&key).cloned();
    match canned {
        Some(canned) => {
            if !canned.delay.is_zero() {
                tokio::time::sleep(canned.delay).await;
            }
            (canned.status, axum::Json(canned.body)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "detail": "Not Found" })),
        )
            .into_response(),
    }
}
