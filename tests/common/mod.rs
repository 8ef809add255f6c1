//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use vendorhub::api::{ApiClient, SessionEvent, SessionEvents, SessionStore};
use vendorhub::config::Environment;

pub use mock_backend::{CapturedRequest, MockBackend, MockResponse};

/// Session events received by a test listener.
pub type EventLog = Arc<Mutex<Vec<SessionEvent>>>;

/// Client pointed at `backend` holding `token`, plus its recorded session events.
pub fn client_for(backend: &MockBackend, token: Option<&str>) -> (ApiClient, EventLog) {
    let events = SessionEvents::new();
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    events.subscribe(move |event| sink.lock().push(event.clone()));

    let client = ApiClient::builder(backend.base_url())
        .session(SessionStore::new(token.map(str::to_string)))
        .session_events(events)
        .build()
        .expect("client should build");
    (client, log)
}

/// Production client sending `origin`.
pub fn production_client(backend: &MockBackend, origin: &str) -> ApiClient {
    ApiClient::builder(backend.base_url())
        .environment(Environment::Production)
        .origin(origin)
        .build()
        .expect("client should build")
}

/// Write `content` to a config file inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_until<F>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
