//! GET requests with bounded retries and exponential backoff.
//!
//! Transient failures (connection errors, timeouts, 429 and 5xx gateway
//! statuses) are retried; other statuses and non-object bodies fail on the
//! first attempt.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::RetryPolicy;
use crate::error::FetchError;

/// Parsed top-level JSON object of a successful response.
pub type JsonObject = Map<String, Value>;

/// Result of a fetch: a JSON object or the terminal failure.
pub type FetchOutcome = Result<JsonObject, FetchError>;

/// One GET request and the retry policy it runs under.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff_factor: f64,
    pub backoff_unit: Duration,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, policy: &RetryPolicy) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            timeout: policy.timeout,
            max_retries: policy.max_retries,
            backoff_factor: policy.backoff_factor,
            backoff_unit: policy.backoff_unit,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Delay slept after the given failed attempt (1-indexed):
    /// `backoff_unit * backoff_factor^attempt`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.backoff_unit.as_secs_f64() * self.backoff_factor.powi(exponent);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Issue `request`, retrying transient failures.
///
/// The HTTP client lives only for the duration of this call.
pub async fn fetch(request: &FetchRequest) -> FetchOutcome {
    let client = Client::builder()
        .timeout(request.timeout)
        .build()
        .map_err(|e| FetchError::InvalidRequest(e.to_string()))?;

    let attempts = request.max_retries.max(1);
    let mut last = None;

    for attempt in 1..=attempts {
        match attempt_once(&client, request).await {
            Ok(body) => return Ok(body),
            Err(err) if err.is_retryable() => {
                tracing::warn!(
                    url = %request.url,
                    attempt,
                    max_retries = attempts,
                    error = %err,
                    "Attempt {}/{} failed",
                    attempt,
                    attempts
                );
                // No sleep after the last attempt: nothing follows it.
                if attempt < attempts {
                    tokio::time::sleep(request.backoff_delay(attempt)).await;
                }
                last = Some(err);
            }
            Err(err) => {
                tracing::warn!(
                    url = %request.url,
                    attempt,
                    error = %err,
                    "Request failed, not retrying"
                );
                return Err(err);
            }
        }
    }

    let last = last.map(|e| e.to_string()).unwrap_or_default();
    tracing::error!(url = %request.url, attempts, last_error = %last, "Retries exhausted");
    Err(FetchError::RetriesExhausted { attempts, last })
}

async fn attempt_once(client: &Client, request: &FetchRequest) -> FetchOutcome {
    let mut builder = client.get(&request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let response = builder.send().await.map_err(classify_transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let text = response.text().await.map_err(classify_transport)?;
    parse_object(&text)
}

fn classify_transport(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_builder() {
        FetchError::InvalidRequest(err.to_string())
    } else {
        FetchError::Network(err.to_string())
    }
}

/// Parse a response body, accepting only a top-level JSON object.
pub fn parse_object(body: &str) -> FetchOutcome {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(FetchError::MalformedBody(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(FetchError::MalformedBody(e.to_string())),
    }
}

/// Map a fetched object onto an upstream model; shape mismatches count as a
/// malformed body.
pub fn decode<T: DeserializeOwned>(body: JsonObject) -> Result<T, FetchError> {
    serde_json::from_value(Value::Object(body))
        .map_err(|e| FetchError::MalformedBody(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
