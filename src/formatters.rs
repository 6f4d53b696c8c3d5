use serde_json::Value;

use crate::constants::NO_ACTIVE_ALERTS;
use crate::models::{AlertFeature, CurrentConditions, ForecastPeriod, LocationLabel};

const BLOCK_SEPARATOR: &str = "\n---\n";

/// Formats NWS forecast periods into a human-readable string
pub fn format_forecast(location: &LocationLabel, periods: &[ForecastPeriod]) -> String {
    let header = format!("Forecast for {}, {}", location.city, location.state);
    let blocks: Vec<String> = periods.iter().map(format_period).collect();
    format!("{}\n\n{}", header.trim(), blocks.join(BLOCK_SEPARATOR))
}

fn format_period(period: &ForecastPeriod) -> String {
    let temperature = period
        .temperature
        .map(|t| t.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let wind = format!("{} {}", period.wind_speed, period.wind_direction);

    format!(
        "{}\nTemperature: {}\u{00b0}{}\nWind: {}\nForecast: {}\n",
        period.name,
        temperature,
        period.temperature_unit,
        wind.trim(),
        period.detailed_forecast
    )
}

/// Formats Open-Meteo current conditions into a human-readable string
pub fn format_fallback_forecast(current: &CurrentConditions) -> String {
    let mut output = format!(
        "Open-Meteo fallback forecast:\nTemperature: {}\u{00b0}C\n",
        passthrough(&current.temperature)
    );
    if let Some(code) = current.weathercode {
        output.push_str(&format!(
            "Conditions: {}\n",
            weather_code_to_description(code)
        ));
    }
    output.push_str(&format!(
        "Wind speed: {} km/h\nWind direction: {}\u{00b0}",
        passthrough(&current.windspeed),
        passthrough(&current.winddirection)
    ));
    output
}

/// Formats weather alerts into a human-readable string
pub fn format_alerts(alerts: &[AlertFeature]) -> String {
    if alerts.is_empty() {
        return NO_ACTIVE_ALERTS.to_string();
    }

    alerts
        .iter()
        .map(|alert| {
            format!(
                "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
                alert.event, alert.area_desc, alert.severity, alert.description, alert.instruction
            )
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

fn passthrough(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Converts WMO weather code to human-readable description
fn weather_code_to_description(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Foggy",
        51 | 53 | 55 => "Drizzle",
        61 | 63 | 65 => "Rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}
