//! In-process mock of the storyboard server.
//!
//! Serves canned JSON per `(method, path)` and records every request it
//! receives so tests can assert on exactly what went over the wire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

/// One request as the mock server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw (still percent-encoded) query string, `None` when absent.
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: serde_json::Value,
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<Mutex<HashMap<(String, String), Canned>>>,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Handle to a running mock server.
pub struct MockBackend {
    pub url: String,
    state: MockState,
}

impl MockBackend {
    /// Bind to an ephemeral local port and start serving.
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(record).with_state(state.clone());

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

    /// Serve `body` with `200 OK` for `method path`.
    pub fn ok(&self, method: &str, path: &str, body: serde_json::Value) {
        self.respond(method, path, 200, body);
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        let canned = Canned {
            status: StatusCode::from_u16(status).expect("valid status"),
            body,
        };
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), canned);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.log.lock().unwrap().clone()
    }

    /// The only request received; panics if there were zero or several.
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    };
    let key = (request.method.clone(), request.path.clone());
    state.log.lock().unwrap().push(request);

    let canned = state.routes.lock().unwrap().get(&key).cloned();
    match canned {
        Some(canned) => (canned.status, axum::Json(canned.body)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({ "detail": "Not Found" })),
        )
            .into_response(),
    }
}
