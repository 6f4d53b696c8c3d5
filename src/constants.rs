/// User agent string for HTTP requests
pub const USER_AGENT: &str = concat!("mcp-weather-fallback/", env!("CARGO_PKG_VERSION"));

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Open-Meteo API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Accept header value the NWS API expects
pub const GEO_JSON: &str = "application/geo+json";

/// Number of forecast periods kept from an NWS response
pub const MAX_FORECAST_PERIODS: usize = 5;

pub const DEFAULT_TIMEOUT_SECS: f64 = 15.0;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 1.5;

// Tool replies that callers match on verbatim.
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";
pub const ALERTS_UNAVAILABLE: &str = "Unable to fetch alerts or no alerts found.";
pub const BOTH_SOURCES_FAILED: &str = "Unable to fetch forecast from both NWS and Open-Meteo.";
