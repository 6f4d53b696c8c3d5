//! Scripted local upstream shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use mcp_weather_fallback::{RetryPolicy, WeatherConfig};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl MockResponse {
    pub fn json(value: Value) -> Self {
        Self {
            status: 200,
            body: value.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: r#"{"detail": "scripted failure"}"#.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct MockState {
    // The last scripted response for a path repeats forever.
    routes: Mutex<HashMap<String, VecDeque<MockResponse>>>,
    hits: Mutex<HashMap<String, usize>>,
    headers: Mutex<HashMap<String, HeaderMap>>,
}

/// A local HTTP server answering each path from a script.
pub struct MockUpstream {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(respond).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn script(&self, path: &str, responses: Vec<MockResponse>) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(path.to_string(), responses.into());
    }

    pub fn hits(&self, path: &str) -> usize {
        self.state.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn last_headers(&self, path: &str) -> Option<HeaderMap> {
        self.state.headers.lock().unwrap().get(path).cloned()
    }
}

async fn respond(State(state): State<Arc<MockState>>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().to_string();
    *state.hits.lock().unwrap().entry(path.clone()).or_default() += 1;
    state.headers.lock().unwrap().insert(path.clone(), headers);

    let scripted = {
        let mut routes = state.routes.lock().unwrap();
        routes.get_mut(&path).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        })
    };

    let Some(response) = scripted else {
        return (StatusCode::NOT_FOUND, r#"{"detail": "not scripted"}"#).into_response();
    };

    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }
    let status = StatusCode::from_u16(response.status).unwrap();
    (status, response.body).into_response()
}

/// Fast retry policy for tests: 3 attempts, millisecond backoff.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        timeout: Duration::from_secs(2),
        max_retries: 3,
        backoff_factor: 1.5,
        backoff_unit: Duration::from_millis(5),
    }
}

/// Config pointing NWS at `nws` and Open-Meteo at `open_meteo`.
pub fn config(nws: &MockUpstream, open_meteo: &MockUpstream) -> WeatherConfig {
    WeatherConfig {
        nws_api_base: nws.base_url.clone(),
        open_meteo_api_base: format!("{}/v1", open_meteo.base_url),
        user_agent: "weather-tests/1.0".to_string(),
        retry: fast_retry(),
    }
}
