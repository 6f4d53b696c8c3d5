//! Runtime configuration, read from `WEATHER_*` environment variables.

use std::time::Duration;

use crate::constants::{
    DEFAULT_BACKOFF_FACTOR, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, NWS_API_BASE,
    OPEN_METEO_API_BASE, USER_AGENT,
};
use crate::error::ConfigError;

/// Retry and timeout settings applied to every upstream request.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Per-attempt timeout.
    pub timeout: Duration,
    /// Total attempts, including the first one. Always at least 1.
    pub max_retries: u32,
    /// Base of the exponential backoff. Always greater than 1.
    pub backoff_factor: f64,
    /// Unit the backoff exponent is multiplied by.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    pub nws_api_base: String,
    pub open_meteo_api_base: String,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            nws_api_base: NWS_API_BASE.to_string(),
            open_meteo_api_base: OPEN_METEO_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl WeatherConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables keep their defaults; values that are present
    /// but invalid are reported instead of being ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_secs: f64 = parse_optional(
            "WEATHER_TIMEOUT_SECS",
            optional("WEATHER_TIMEOUT_SECS"),
            defaults.retry.timeout.as_secs_f64(),
        )?;
        if !(timeout_secs.is_finite() && timeout_secs > 0.0) {
            return Err(invalid("WEATHER_TIMEOUT_SECS", "must be a positive number"));
        }
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .map_err(|e| invalid("WEATHER_TIMEOUT_SECS", e.to_string()))?;

        let max_retries: u32 = parse_optional(
            "WEATHER_MAX_RETRIES",
            optional("WEATHER_MAX_RETRIES"),
            defaults.retry.max_retries,
        )?;
        if max_retries < 1 {
            return Err(invalid("WEATHER_MAX_RETRIES", "must be at least 1"));
        }

        let backoff_factor: f64 = parse_optional(
            "WEATHER_BACKOFF_FACTOR",
            optional("WEATHER_BACKOFF_FACTOR"),
            defaults.retry.backoff_factor,
        )?;
        if !(backoff_factor.is_finite() && backoff_factor > 1.0) {
            return Err(invalid("WEATHER_BACKOFF_FACTOR", "must be greater than 1"));
        }

        Ok(Self {
            nws_api_base: optional("WEATHER_NWS_API_BASE")
                .map(|v| trim_base(&v))
                .unwrap_or(defaults.nws_api_base),
            open_meteo_api_base: optional("WEATHER_OPEN_METEO_API_BASE")
                .map(|v| trim_base(&v))
                .unwrap_or(defaults.open_meteo_api_base),
            user_agent: optional("WEATHER_USER_AGENT").unwrap_or(defaults.user_agent),
            retry: RetryPolicy {
                timeout,
                max_retries,
                backoff_factor,
                backoff_unit: defaults.retry.backoff_unit,
            },
        })
    }
}

fn parse_optional<T>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|s| s.trim().parse().map_err(|e| invalid(key, format!("{e}"))))
        .transpose()
        .map(|opt| opt.unwrap_or(default))
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
