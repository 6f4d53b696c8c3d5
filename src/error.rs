//! Error types for the weather fetch pipeline.

/// Failure of a single [`fetch`](crate::fetch::fetch) call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("upstream returned HTTP {0}")]
    HttpStatus(u16),

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("gave up after {attempts} attempts (last error: {last})")]
    RetriesExhausted { attempts: u32, last: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// Transient failures are worth another attempt; everything else fails fast.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) | FetchError::Timeout => true,
            FetchError::HttpStatus(status) => is_retryable_status(*status),
            FetchError::MalformedBody(_)
            | FetchError::RetriesExhausted { .. }
            | FetchError::InvalidRequest(_) => false,
        }
    }
}

/// Returns `true` if the HTTP status code is transient and worth retrying.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Reasons the NWS forecast path hands over to the fallback source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    #[error("failed to resolve grid point: {0}")]
    Points(FetchError),

    #[error(
        "forecast URL not produced by upstream (office: {})",
        office.as_deref().unwrap_or("unknown")
    )]
    MissingForecastUrl { office: Option<String> },

    #[error("failed to fetch forecast: {0}")]
    Forecast(FetchError),

    #[error("forecast contained no periods")]
    EmptyPeriods,
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
