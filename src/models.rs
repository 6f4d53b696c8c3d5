use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Normalized Weather Data
// ============================================================================

/// A latitude/longitude pair. Ranges are not validated here; out-of-range
/// values simply produce empty upstream results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationLabel {
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: Option<f64>,
    pub temperature_unit: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub detailed_forecast: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertFeature {
    pub event: String,
    pub area_desc: String,
    pub severity: String,
    pub description: String,
    pub instruction: String,
}

/// Current conditions reported by Open-Meteo. Values are passed through
/// as-is because upstream may omit or retype them.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: Value,
    pub windspeed: Value,
    pub winddirection: Value,
    pub weathercode: Option<i64>,
}

// ============================================================================
// National Weather Service API Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PointsResponse {
    #[serde(default)]
    pub properties: PointsProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsProperties {
    #[serde(default)]
    pub forecast: Option<String>,
    #[serde(default)]
    pub grid_id: Option<String>,
    #[serde(default)]
    pub cwa: Option<String>,
    #[serde(default)]
    pub relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelativeLocation {
    #[serde(default)]
    pub properties: Option<RelativeLocationProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelativeLocationProperties {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<RelativeLocationProperties> for LocationLabel {
    fn from(props: RelativeLocationProperties) -> Self {
        LocationLabel {
            city: props.city.unwrap_or_default(),
            state: props.state.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub properties: ForecastProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<PeriodProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodProperties {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(default)]
    pub temperature_unit: Option<String>,
    #[serde(default)]
    pub wind_speed: Option<String>,
    #[serde(default)]
    pub wind_direction: Option<String>,
    #[serde(default)]
    pub detailed_forecast: Option<String>,
}

impl From<PeriodProperties> for ForecastPeriod {
    fn from(raw: PeriodProperties) -> Self {
        ForecastPeriod {
            name: raw.name.unwrap_or_else(|| "Unknown period".to_string()),
            temperature: raw.temperature.as_ref().and_then(Value::as_f64),
            temperature_unit: raw.temperature_unit.unwrap_or_default(),
            wind_speed: raw.wind_speed.unwrap_or_default(),
            wind_direction: raw.wind_direction.unwrap_or_default(),
            detailed_forecast: raw
                .detailed_forecast
                .unwrap_or_else(|| "No details available.".to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertResponse {
    #[serde(default)]
    pub features: Option<Vec<AlertEntry>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertEntry {
    #[serde(default)]
    pub properties: Option<AlertProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub area_desc: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
}

impl From<AlertProperties> for AlertFeature {
    fn from(props: AlertProperties) -> Self {
        let unknown = || "Unknown".to_string();
        AlertFeature {
            event: props.event.unwrap_or_else(unknown),
            area_desc: props.area_desc.unwrap_or_else(unknown),
            severity: props.severity.unwrap_or_else(unknown),
            description: props
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            instruction: props
                .instruction
                .unwrap_or_else(|| "No specific instructions provided".to_string()),
        }
    }
}

// ============================================================================
// Open-Meteo API Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct OpenMeteoResponse {
    #[serde(default)]
    pub current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(default)]
    pub windspeed: Option<Value>,
    #[serde(default)]
    pub winddirection: Option<Value>,
    #[serde(default)]
    pub weathercode: Option<Value>,
}

// ============================================================================
// Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter US state code, e.g. "CA".
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GetForecastRequest> for GeoPoint {
    fn from(request: GetForecastRequest) -> Self {
        GeoPoint {
            latitude: request.latitude,
            longitude: request.longitude,
        }
    }
}
