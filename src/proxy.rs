//! HTTP front end that exposes the weather tools as JSON endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::models::GeoPoint;
use crate::orchestrator::WeatherTools;

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    pub state: String,
}

pub fn router(tools: WeatherTools) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/get_forecast", get(get_forecast))
        .route("/get_alerts", get(get_alerts))
        .with_state(tools)
}

/// Serve the proxy until the listener fails.
pub async fn serve(listener: tokio::net::TcpListener, tools: WeatherTools) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "HTTP proxy listening");
    }
    axum::serve(listener, router(tools)).await
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({"status": "MCP weather proxy running"}))
}

async fn get_forecast(
    State(tools): State<WeatherTools>,
    Query(query): Query<ForecastQuery>,
) -> Response {
    tracing::info!(latitude = query.latitude, longitude = query.longitude, "Proxying get_forecast");
    let point = GeoPoint {
        latitude: query.latitude,
        longitude: query.longitude,
    };
    let task = tokio::spawn(async move { tools.get_forecast(point).await });
    tool_response("get_forecast", task.await)
}

async fn get_alerts(
    State(tools): State<WeatherTools>,
    Query(query): Query<AlertsQuery>,
) -> Response {
    tracing::info!(state = %query.state, "Proxying get_alerts");
    let task = tokio::spawn(async move { tools.get_alerts(&query.state).await });
    tool_response("get_alerts", task.await)
}

// The tools already turn panics into text, so a join error here means the
// task was cancelled, e.g. during runtime shutdown.
fn tool_response(tool: &str, outcome: Result<String, tokio::task::JoinError>) -> Response {
    match outcome {
        Ok(result) => Json(json!({"tool": tool, "result": result})).into_response(),
        Err(e) => {
            tracing::error!(tool, error = %e, "Error calling weather tool");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": e.to_string()})),
            )
                .into_response()
        }
    }
}
