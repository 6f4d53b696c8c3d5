//! Open-Meteo adapter: current conditions, used when the NWS path fails.

use serde_json::Value;

use crate::config::{RetryPolicy, WeatherConfig};
use crate::error::FetchError;
use crate::fetch::{decode, fetch, FetchRequest};
use crate::models::{CurrentConditions, GeoPoint, OpenMeteoResponse};

#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    base_url: String,
    user_agent: String,
    retry: RetryPolicy,
}

impl OpenMeteoSource {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            base_url: config.open_meteo_api_base.clone(),
            user_agent: config.user_agent.clone(),
            retry: config.retry.clone(),
        }
    }

    pub async fn current_conditions(
        &self,
        point: GeoPoint,
    ) -> Result<CurrentConditions, FetchError> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current_weather=true",
            self.base_url, point.latitude, point.longitude
        );
        let request =
            FetchRequest::new(url, &self.retry).header("User-Agent", self.user_agent.as_str());

        let response: OpenMeteoResponse = fetch(&request).await.and_then(decode)?;
        let current = response.current_weather.unwrap_or_default();

        Ok(CurrentConditions {
            temperature: or_unknown(current.temperature),
            windspeed: or_unknown(current.windspeed),
            winddirection: or_unknown(current.winddirection),
            weathercode: current.weathercode.as_ref().and_then(Value::as_i64),
        })
    }
}

fn or_unknown(value: Option<Value>) -> Value {
    match value {
        Some(Value::Null) | None => Value::String("Unknown".to_string()),
        Some(v) => v,
    }
}
