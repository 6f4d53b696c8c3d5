//! Source selection for forecasts and the text-only tool boundary.

use std::any::Any;
use std::future::Future;

use crate::config::WeatherConfig;
use crate::constants::{ALERTS_UNAVAILABLE, BOTH_SOURCES_FAILED};
use crate::formatters::{format_alerts, format_fallback_forecast, format_forecast};
use crate::models::{CurrentConditions, GeoPoint};
use crate::nws::{AlertsOutcome, NwsForecast, NwsSource};
use crate::open_meteo::OpenMeteoSource;

/// Which source ended up answering a forecast request.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastReport {
    Primary(NwsForecast),
    Fallback(CurrentConditions),
    BothFailed,
}

impl ForecastReport {
    pub fn render(&self) -> String {
        match self {
            ForecastReport::Primary(forecast) => {
                format_forecast(&forecast.location, &forecast.periods)
            }
            ForecastReport::Fallback(current) => format_fallback_forecast(current),
            ForecastReport::BothFailed => BOTH_SOURCES_FAILED.to_string(),
        }
    }
}

/// Runs the weather tools. Holds configuration only; every call builds and
/// drops its own HTTP client.
#[derive(Debug, Clone)]
pub struct WeatherTools {
    nws: NwsSource,
    open_meteo: OpenMeteoSource,
}

impl WeatherTools {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            nws: NwsSource::new(config),
            open_meteo: OpenMeteoSource::new(config),
        }
    }

    /// NWS first, Open-Meteo if any NWS stage fails.
    pub async fn resolve_forecast(&self, point: GeoPoint) -> ForecastReport {
        match self.nws.forecast(point).await {
            Ok(forecast) => {
                tracing::info!(periods = forecast.periods.len(), "Using NWS forecast");
                return ForecastReport::Primary(forecast);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to Open-Meteo API...");
            }
        }

        match self.open_meteo.current_conditions(point).await {
            Ok(current) => ForecastReport::Fallback(current),
            Err(e) => {
                tracing::error!(error = %e, "Open-Meteo fallback failed");
                ForecastReport::BothFailed
            }
        }
    }

    /// Forecast text for `point`. Never fails: problems come back as prose.
    pub async fn get_forecast(&self, point: GeoPoint) -> String {
        let tools = self.clone();
        recover_text("forecast", async move { tools.resolve_forecast(point).await.render() }).await
    }

    /// Alert text for a two-letter state code. Never fails.
    pub async fn get_alerts(&self, state: &str) -> String {
        let tools = self.clone();
        let state = state.trim().to_uppercase();
        recover_text("alerts", async move {
            match tools.nws.alerts(&state).await {
                AlertsOutcome::Active(alerts) => format_alerts(&alerts),
                AlertsOutcome::NoneActive => format_alerts(&[]),
                AlertsOutcome::Unavailable => ALERTS_UNAVAILABLE.to_string(),
            }
        })
        .await
    }
}

/// Run `body` on its own task and turn a panic into diagnostic text.
///
/// This is the single catch-all between the tool surfaces and the fetch
/// pipeline; everything below it propagates `Result`s.
pub async fn recover_text<F>(what: &str, body: F) -> String
where
    F: Future<Output = String> + Send + 'static,
{
    match tokio::spawn(body).await {
        Ok(text) => text,
        Err(join_err) => {
            let (summary, trace) = if join_err.is_panic() {
                let message = panic_message(join_err.into_panic());
                (message.clone(), format!("  panicked while fetching {what}: {message}"))
            } else {
                let message = join_err.to_string();
                (message.clone(), format!("  task for {what} did not complete: {message}"))
            };
            tracing::error!(what, error = %summary, "Tool task failed");
            format!("Internal error fetching {what}: {summary}\n\nTraceback:\n{trace}")
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{ForecastPeriod, LocationLabel};

    #[tokio::test]
    async fn recover_text_passes_through_output() {
        let text = recover_text("forecast", async { "sunny".to_string() }).await;
        assert_eq!(text, "sunny");
    }

    #[tokio::test]
    async fn recover_text_turns_panics_into_diagnostics() {
        let text = recover_text("forecast", async {
            let periods: Vec<String> = Vec::new();
            periods[0].clone()
        })
        .await;

        assert!(text.starts_with("Internal error fetching forecast: index out of bounds"));
        assert!(text.contains("Traceback:"));
    }

    #[test]
    fn report_renders_each_source() {
        let primary = ForecastReport::Primary(NwsForecast {
            location: LocationLabel {
                city: "Denver".to_string(),
                state: "CO".to_string(),
            },
            periods: vec![ForecastPeriod {
                name: "Today".to_string(),
                temperature: Some(60.0),
                temperature_unit: "F".to_string(),
                wind_speed: "5 mph".to_string(),
                wind_direction: "E".to_string(),
                detailed_forecast: "Clear.".to_string(),
            }],
        });
        assert!(primary.render().starts_with("Forecast for Denver, CO"));

        let fallback = ForecastReport::Fallback(CurrentConditions {
            temperature: json!(15),
            windspeed: json!(10),
            winddirection: json!(200),
            weathercode: None,
        });
        assert!(fallback.render().contains("15°C"));

        assert!(ForecastReport::BothFailed.render().contains("both"));
    }
}
