//! National Weather Service adapter: points → forecast chaining and alerts.

use crate::config::{RetryPolicy, WeatherConfig};
use crate::constants::{GEO_JSON, MAX_FORECAST_PERIODS};
use crate::error::ForecastError;
use crate::fetch::{decode, fetch, FetchRequest};
use crate::models::{
    AlertFeature, AlertResponse, ForecastPeriod, ForecastResponse, GeoPoint, LocationLabel,
    PointsResponse,
};

/// Successful NWS forecast: at most five periods and the resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct NwsForecast {
    pub location: LocationLabel,
    pub periods: Vec<ForecastPeriod>,
}

/// What the alerts endpoint reported.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertsOutcome {
    Active(Vec<AlertFeature>),
    NoneActive,
    /// Fetch failed, the state code was malformed, or the response carried
    /// no `features` key.
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct NwsSource {
    base_url: String,
    user_agent: String,
    retry: RetryPolicy,
}

impl NwsSource {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            base_url: config.nws_api_base.clone(),
            user_agent: config.user_agent.clone(),
            retry: config.retry.clone(),
        }
    }

    fn request(&self, url: impl Into<String>) -> FetchRequest {
        FetchRequest::new(url, &self.retry)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", GEO_JSON)
    }

    /// Resolve the grid point for `point`, then its forecast.
    pub async fn forecast(&self, point: GeoPoint) -> Result<NwsForecast, ForecastError> {
        let points_url = format!(
            "{}/points/{},{}",
            self.base_url, point.latitude, point.longitude
        );
        let points: PointsResponse = fetch(&self.request(points_url))
            .await
            .and_then(decode)
            .map_err(ForecastError::Points)?;

        let props = points.properties;
        let location = props
            .relative_location
            .and_then(|loc| loc.properties)
            .map(LocationLabel::from)
            .unwrap_or_default();

        let forecast_url = props
            .forecast
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ForecastError::MissingForecastUrl {
                office: props.grid_id.or(props.cwa),
            })?;

        let forecast: ForecastResponse = fetch(&self.request(forecast_url))
            .await
            .and_then(decode)
            .map_err(ForecastError::Forecast)?;

        let periods: Vec<ForecastPeriod> = forecast
            .properties
            .periods
            .into_iter()
            .take(MAX_FORECAST_PERIODS)
            .map(ForecastPeriod::from)
            .collect();

        if periods.is_empty() {
            return Err(ForecastError::EmptyPeriods);
        }

        Ok(NwsForecast { location, periods })
    }

    /// Active alerts for a two-letter state code.
    pub async fn alerts(&self, state: &str) -> AlertsOutcome {
        if state.len() != 2 || !state.bytes().all(|b| b.is_ascii_alphabetic()) {
            tracing::warn!(state, "Rejecting malformed state code");
            return AlertsOutcome::Unavailable;
        }
        let url = format!("{}/alerts/active/area/{}", self.base_url, state);

        let body = match fetch(&self.request(url)).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(state, error = %e, "Failed to fetch alerts");
                return AlertsOutcome::Unavailable;
            }
        };
        // An absent key means unavailable; an explicit null means none active.
        if !body.contains_key("features") {
            return AlertsOutcome::Unavailable;
        }
        let response: AlertResponse = match decode(body) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(state, error = %e, "Unexpected alerts payload");
                return AlertsOutcome::Unavailable;
            }
        };

        match response.features {
            None => AlertsOutcome::NoneActive,
            Some(features) if features.is_empty() => AlertsOutcome::NoneActive,
            Some(features) => AlertsOutcome::Active(
                features
                    .into_iter()
                    .map(|f| AlertFeature::from(f.properties.unwrap_or_default()))
                    .collect(),
            ),
        }
    }
}
