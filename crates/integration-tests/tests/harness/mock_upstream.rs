//! Mock provider backend for integration tests
//!
//! Serves every provider's upstream path under its own prefix, so one mock
//! can stand in for all five providers at once.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

/// Audio chunks streamed by the mock, in order
pub const AUDIO_CHUNKS: [&[u8]; 3] = [b"ID3-", b"frame-one-", b"frame-two"];

const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(10);

/// Job descriptor returned by the mock D-ID endpoint
pub fn job_descriptor() -> serde_json::Value {
    serde_json::json!({
        "id": "tlk_mock_1",
        "object": "talk",
        "status": "created",
        "created_at": "2024-01-01T00:00:00.000Z",
    })
}

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub provider: String,
    pub path: String,
    pub credential: Option<String>,
    pub body: serde_json::Value,
}

/// Mock provider backend returning predictable responses
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    request_count: AtomicU32,
    /// Status and body returned instead of success (if set)
    failure: Option<(StatusCode, String)>,
    /// Content type of audio responses; none omits the header
    media_type: Option<String>,
    /// Pause before each audio chunk
    chunk_delay: Duration,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockUpstream {
    /// Start a mock that answers every provider successfully
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None, Some("audio/mpeg".to_owned()), DEFAULT_CHUNK_DELAY).await
    }

    /// Start a mock that fails every request with `status` and `body`
    pub async fn start_failing(status: u16, body: &str) -> anyhow::Result<Self> {
        Self::start_inner(
            Some((StatusCode::from_u16(status)?, body.to_owned())),
            None,
            DEFAULT_CHUNK_DELAY,
        )
        .await
    }

    /// Start a mock whose audio responses carry `media_type`, or no content type at all
    pub async fn start_with_media_type(media_type: Option<&str>) -> anyhow::Result<Self> {
        Self::start_inner(None, media_type.map(str::to_owned), DEFAULT_CHUNK_DELAY).await
    }

    /// Start a mock that sends headers at once but pauses `chunk_delay` before each audio chunk
    pub async fn start_slow(chunk_delay: Duration) -> anyhow::Result<Self> {
        Self::start_inner(None, Some("audio/mpeg".to_owned()), chunk_delay).await
    }

    async fn start_inner(
        failure: Option<(StatusCode, String)>,
        media_type: Option<String>,
        chunk_delay: Duration,
    ) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            request_count: AtomicU32::new(0),
            failure,
            media_type,
            chunk_delay,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/openai/audio/speech", routing::post(handle_openai))
            .route("/claude/audio/speech", routing::post(handle_claude))
            .route("/gemini/audio/speech", routing::post(handle_gemini))
            .route("/elevenlabs/text-to-speech/{voice_id}", routing::post(handle_elevenlabs))
            .route("/did/talks", routing::post(handle_did))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as `provider`
    pub fn base_url(&self, provider: &str) -> String {
        format!("http://{}/{provider}", self.addr)
    }

    /// Number of requests received across all providers
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Requests received, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("mock state poisoned").clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("at least one upstream request")
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl MockState {
    fn record(&self, provider: &str, path: String, credential: Option<String>, body: serde_json::Value) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.requests.lock().expect("mock state poisoned").push(RecordedRequest {
            provider: provider.to_owned(),
            path,
            credential,
            body,
        });
    }

    fn failure(&self) -> Option<Response> {
        self.failure
            .as_ref()
            .map(|(status, body)| (*status, body.clone()).into_response())
    }

    /// Stream the canned audio chunks with a pause between them
    fn audio(&self) -> Response {
        if let Some(response) = self.failure() {
            return response;
        }

        let delay = self.chunk_delay;
        let stream = futures::stream::iter(AUDIO_CHUNKS).then(move |chunk| async move {
            tokio::time::sleep(delay).await;
            Ok::<_, std::io::Error>(Bytes::from_static(chunk))
        });

        let mut response = Body::from_stream(stream).into_response();

        if let Some(media_type) = &self.media_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, media_type.parse().expect("valid media type"));
        }

        response
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    header_value(headers, "authorization").and_then(|v| v.strip_prefix("Bearer ").map(str::to_owned))
}

async fn handle_openai(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.record("openai", "/audio/speech".to_owned(), bearer(&headers), body);
    state.audio()
}

async fn handle_claude(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.record("claude", "/audio/speech".to_owned(), header_value(&headers, "x-api-key"), body);
    state.audio()
}

#[derive(serde::Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

async fn handle_gemini(
    State(state): State<Arc<MockState>>,
    Query(query): Query<KeyQuery>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.record("gemini", "/audio/speech".to_owned(), query.key, body);
    state.audio()
}

async fn handle_elevenlabs(
    State(state): State<Arc<MockState>>,
    Path(voice_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.record(
        "elevenlabs",
        format!("/text-to-speech/{voice_id}"),
        header_value(&headers, "xi-api-key"),
        body,
    );
    state.audio()
}

async fn handle_did(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.record("did", "/talks".to_owned(), bearer(&headers), body);

    if let Some(response) = state.failure() {
        return response;
    }

    (StatusCode::CREATED, Json(job_descriptor())).into_response()
}
