//! Weather forecasts and alerts from the National Weather Service with an
//! Open-Meteo fallback, served as MCP tools over stdio or as an HTTP proxy.

pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod models;
pub mod nws;
pub mod open_meteo;
pub mod orchestrator;
pub mod proxy;
pub mod service;

pub use config::{RetryPolicy, WeatherConfig};
pub use error::{ConfigError, FetchError, ForecastError};
pub use fetch::{fetch, FetchOutcome, FetchRequest};
pub use models::GeoPoint;
pub use orchestrator::{ForecastReport, WeatherTools};
pub use service::Weather;
