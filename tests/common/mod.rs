#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use podcycle::{
    config::Settings, context::AppContext, playback::PlaybackDuration, types::AccessToken,
};
use serde_json::{Value, json};
use tempfile::TempDir;

pub const ISSUED_TOKEN: &str = "fresh-token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Dispatched(String),
    Completed(String),
}

/// Behaviour of the fake Web API.
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub accepted_tokens: HashSet<String>,
    pub token_status: StatusCode,
    pub token_delay: Duration,
    pub play_failures: HashMap<String, StatusCode>,
    pub play_delay: Duration,
    pub player_state: Option<Value>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            accepted_tokens: HashSet::from([ISSUED_TOKEN.to_string()]),
            token_status: StatusCode::OK,
            token_delay: Duration::from_millis(0),
            play_failures: HashMap::new(),
            play_delay: Duration::from_millis(0),
            player_state: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct MockState {
    pub config: MockConfig,
    pub probe_requests: AtomicUsize,
    pub token_requests: AtomicUsize,
    pub play_requests: AtomicUsize,
    pub player_requests: AtomicUsize,
    pub plays_in_flight: AtomicUsize,
    pub max_plays_in_flight: AtomicUsize,
    pub token_forms: Mutex<Vec<HashMap<String, String>>>,
    pub play_bodies: Mutex<Vec<Value>>,
    pub bearers: Mutex<Vec<String>>,
    pub events: Mutex<Vec<Event>>,
}

impl MockState {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn dispatched(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Dispatched(id) => Some(id),
                Event::Completed(_) => None,
            })
            .collect()
    }

    pub fn completed(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Completed(id) => Some(id),
                Event::Dispatched(_) => None,
            })
            .collect()
    }
}

pub struct MockSpotify {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockSpotify {
    pub async fn start(config: MockConfig) -> Self {
        let state = Arc::new(MockState {
            config,
            ..Default::default()
        });

        let app = Router::new()
            .route("/v1/me", get(me))
            .route("/v1/me/player", get(player))
            .route("/v1/me/player/play", put(play))
            .route("/api/token", post(token))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn token_url(&self) -> String {
        format!("http://{}/api/token", self.addr)
    }

    pub fn settings(&self, credentials_path: &Path) -> Settings {
        let mut settings = Settings::new(credentials_path);
        settings.api_url = self.api_url();
        settings.token_url = self.token_url();
        settings.playback_duration = Duration::from_millis(0);
        settings.poll_interval = Duration::from_millis(10);
        settings.launch_renderer = false;
        settings
    }

    pub fn context(&self, credentials_path: &Path) -> AppContext {
        AppContext::new(self.settings(credentials_path))
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.probe_requests.fetch_add(1, Ordering::SeqCst);
    match bearer(&headers) {
        Some(token) if state.config.accepted_tokens.contains(&token) => {
            Json(json!({ "id": "automation" })).into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "status": 401, "message": "Invalid access token" } })),
        )
            .into_response(),
    }
}

async fn token(
    State(state): State<Arc<MockState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.token_requests.fetch_add(1, Ordering::SeqCst);
    state.token_forms.lock().unwrap().push(form);
    tokio::time::sleep(state.config.token_delay).await;

    if state.config.token_status != StatusCode::OK {
        return (
            state.config.token_status,
            Json(json!({ "error": "invalid_client" })),
        )
            .into_response();
    }

    Json(json!({
        "access_token": ISSUED_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600
    }))
    .into_response()
}

async fn play(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.play_requests.fetch_add(1, Ordering::SeqCst);
    if let Some(token) = bearer(&headers) {
        state.bearers.lock().unwrap().push(token);
    }

    let episode_id = body["uris"][0]
        .as_str()
        .and_then(|uri| uri.strip_prefix("spotify:episode:"))
        .unwrap_or_default()
        .to_string();
    state.play_bodies.lock().unwrap().push(body);
    state
        .events
        .lock()
        .unwrap()
        .push(Event::Dispatched(episode_id.clone()));

    let now = state.plays_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_plays_in_flight.fetch_max(now, Ordering::SeqCst);
    tokio::time::sleep(state.config.play_delay).await;
    state.plays_in_flight.fetch_sub(1, Ordering::SeqCst);

    match state.config.play_failures.get(&episode_id) {
        Some(status) => (
            *status,
            Json(json!({ "error": { "status": status.as_u16(), "message": "Player command failed: Restriction violated" } })),
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn player(State(state): State<Arc<MockState>>) -> Response {
    state.player_requests.fetch_add(1, Ordering::SeqCst);
    match &state.config.player_state {
        Some(value) => Json(value.clone()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Duration source that records completions and how many episodes are
/// waiting at the same time.
pub struct RecordingDuration {
    pub state: Arc<MockState>,
    pub delay: Duration,
    pub waiting: Arc<AtomicUsize>,
    pub max_waiting: Arc<AtomicUsize>,
}

impl RecordingDuration {
    pub fn new(state: Arc<MockState>, delay: Duration) -> Self {
        Self {
            state,
            delay,
            waiting: Arc::new(AtomicUsize::new(0)),
            max_waiting: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl PlaybackDuration for RecordingDuration {
    async fn wait_for_completion(&self, episode_id: &str, _token: &AccessToken) {
        let now = self.waiting.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_waiting.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.waiting.fetch_sub(1, Ordering::SeqCst);
        self.state
            .events
            .lock()
            .unwrap()
            .push(Event::Completed(episode_id.to_string()));
    }
}

/// Duration source that switches playback off in the credential document
/// once `after` episodes have finished.
pub struct DisablingDuration {
    pub path: PathBuf,
    pub after: usize,
    pub finished: AtomicUsize,
}

#[async_trait]
impl PlaybackDuration for DisablingDuration {
    async fn wait_for_completion(&self, _episode_id: &str, _token: &AccessToken) {
        let finished = self.finished.fetch_add(1, Ordering::SeqCst) + 1;
        if finished == self.after {
            let mut doc: Value =
                serde_json::from_str(&std::fs::read_to_string(&self.path).unwrap()).unwrap();
            doc["spotify"]["enabled"] = Value::Bool(false);
            std::fs::write(&self.path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
        }
    }
}

pub fn credentials_json(episode_ids: &[&str], access_token: Option<&str>, enabled: bool) -> Value {
    let mut section = json!({
        "client_id": "client-123",
        "client_secret": "secret-456",
        "podcast_id": "podcast-789",
        "episode_ids": episode_ids,
        "device_id": "device-abc",
        "enabled": enabled
    });
    if let Some(token) = access_token {
        section["access_token"] = Value::String(token.to_string());
    }
    json!({ "spotify": section })
}

pub fn write_document(dir: &TempDir, document: &Value) -> PathBuf {
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    path
}

pub fn write_raw(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, content).unwrap();
    path
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
