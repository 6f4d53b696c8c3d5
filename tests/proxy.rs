mod common;

use common::{config, MockResponse, MockUpstream};
use mcp_weather_fallback::{proxy, WeatherTools};
use serde_json::{json, Value};

async fn start_proxy(tools: WeatherTools) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        proxy::serve(listener, tools).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn root_reports_liveness() {
    let nws = MockUpstream::start().await;
    let meteo = MockUpstream::start().await;
    let base = start_proxy(WeatherTools::new(&config(&nws, &meteo))).await;

    let body: Value = reqwest::get(format!("{base}/")).await.unwrap().json().await.unwrap();

    assert!(body["status"].as_str().unwrap().ends_with("running"));
}

#[tokio::test]
async fn get_forecast_wraps_tool_output() {
    let nws = MockUpstream::start().await;
    let meteo = MockUpstream::start().await;
    nws.script("/points/40,-105", vec![MockResponse::status(404)]);
    meteo.script(
        "/v1/forecast",
        vec![MockResponse::json(json!({
            "current_weather": {"temperature": 15, "windspeed": 10, "winddirection": 200}
        }))],
    );
    let base = start_proxy(WeatherTools::new(&config(&nws, &meteo))).await;

    let response = reqwest::get(format!("{base}/get_forecast?latitude=40&longitude=-105"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["tool"], "get_forecast");
    let result = body["result"].as_str().unwrap();
    assert!(result.contains("Open-Meteo fallback forecast"), "{result}");
    assert!(result.contains("15°C"));
}

#[tokio::test]
async fn get_alerts_wraps_tool_output() {
    let nws = MockUpstream::start().await;
    let meteo = MockUpstream::start().await;
    nws.script("/alerts/active/area/TX", vec![MockResponse::json(json!({"features": []}))]);
    let base = start_proxy(WeatherTools::new(&config(&nws, &meteo))).await;

    let body: Value = reqwest::get(format!("{base}/get_alerts?state=TX"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["tool"], "get_alerts");
    assert_eq!(body["result"], "No active alerts for this state.");
}

#[tokio::test]
async fn missing_coordinates_are_rejected() {
    let nws = MockUpstream::start().await;
    let meteo = MockUpstream::start().await;
    let base = start_proxy(WeatherTools::new(&config(&nws, &meteo))).await;

    let response = reqwest::get(format!("{base}/get_forecast?latitude=40"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
