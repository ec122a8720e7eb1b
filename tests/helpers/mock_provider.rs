use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Canned responses for an in-process transcription provider.
pub struct ProviderScript {
    pub upload: (u16, String),
    pub submit: (u16, String),
    /// Served in order; the last one repeats once the queue is drained.
    pub statuses: Vec<(u16, String)>,
}

impl Default for ProviderScript {
    fn default() -> Self {
        Self {
            upload: (200, r#"{"upload_url": "https://cdn.example/upload/1"}"#.to_string()),
            submit: (200, r#"{"id": "abc123", "status": "queued"}"#.to_string()),
            statuses: vec![(
                200,
                r#"{"id": "abc123", "status": "completed", "text": "hello"}"#.to_string(),
            )],
        }
    }
}

#[derive(Default)]
pub struct Recorded {
    pub hits: AtomicUsize,
    pub status_hits: AtomicUsize,
    pub authorization: Mutex<Vec<String>>,
    pub content_types: Mutex<Vec<String>>,
    pub uploaded: Mutex<Vec<u8>>,
    pub submitted: Mutex<Option<serde_json::Value>>,
    pub polled_ids: Mutex<Vec<String>>,
}

struct MockState {
    upload: (u16, String),
    submit: (u16, String),
    statuses: Mutex<VecDeque<(u16, String)>>,
    recorded: Arc<Recorded>,
}

pub struct MockProvider {
    pub base_url: String,
    pub recorded: Arc<Recorded>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockProvider {
    pub async fn start(script: ProviderScript) -> Self {
        let recorded = Arc::new(Recorded::default());
        let state = Arc::new(MockState {
            upload: script.upload,
            submit: script.submit,
            statuses: Mutex::new(script.statuses.into_iter().collect()),
            recorded: Arc::clone(&recorded),
        });

        let app = Router::new()
            .route("/upload", post(upload))
            .route("/transcript", post(submit))
            .route("/transcript/{id}", get(status))
            .with_state(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            recorded,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn hits(&self) -> usize {
        self.recorded.hits.load(Ordering::SeqCst)
    }

    pub fn status_hits(&self) -> usize {
        self.recorded.status_hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            tx.send(()).ok();
        }
    }
}

fn record_headers(recorded: &Recorded, headers: &HeaderMap) {
    recorded.hits.fetch_add(1, Ordering::SeqCst);
    if let Some(auth) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        recorded.authorization.lock().unwrap().push(auth.to_string());
    }
    if let Some(ct) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        recorded.content_types.lock().unwrap().push(ct.to_string());
    }
}

fn json_response((code, body): (u16, String)) -> Response {
    let status = StatusCode::from_u16(code).unwrap();
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn upload(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
    record_headers(&state.recorded, &headers);
    state.recorded.uploaded.lock().unwrap().extend_from_slice(&body);
    json_response(state.upload.clone())
}

async fn submit(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
    record_headers(&state.recorded, &headers);
    *state.recorded.submitted.lock().unwrap() = serde_json::from_slice(&body).ok();
    json_response(state.submit.clone())
}

async fn status(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record_headers(&state.recorded, &headers);
    state.recorded.status_hits.fetch_add(1, Ordering::SeqCst);
    state.recorded.polled_ids.lock().unwrap().push(id);

    let next = {
        let mut statuses = state.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        }
    };

    match next {
        Some(response) => json_response(response),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
