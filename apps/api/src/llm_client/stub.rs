//! Local stand-in for the Gemini endpoint, used by client tests.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubServer {
    pub async fn last_request(&self) -> CapturedRequest {
        self.requests
            .lock()
            .await
            .last()
            .cloned()
            .expect("stub received no request")
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

/// A `generateContent` reply whose single candidate carries `text`.
pub fn candidate_text(text: &str) -> Value {
    json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 34}
    })
}

/// Spawns a server answering every `generateContent` call with `status` and `reply`.
pub async fn spawn_stub(status: StatusCode, reply: Value) -> StubServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        reply,
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/v1beta/models/:call", post(handle_generate))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    StubServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}

/// A base URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    format!("http://{addr}")
}

async fn handle_generate(
    State(state): State<StubState>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().await.push(CapturedRequest {
        path: format!("/v1beta/models/{call}"),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body,
    });
    (state.status, Json(state.reply.clone()))
}
