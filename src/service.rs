use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};

use crate::config::WeatherConfig;
use crate::models::{GetAlertsRequest, GetForecastRequest};
use crate::orchestrator::WeatherTools;

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    tools: WeatherTools,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            tools: WeatherTools::new(config),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather forecasts and alerts from the National Weather Service, \
                falling back to Open-Meteo current conditions when NWS is unavailable."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets active weather alerts for a US state
    #[tool(description = "Get weather alerts for a US state. Provide a two-letter state code (e.g., 'CA' for California, 'NY' for New York).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        let text = self.tools.get_alerts(&request.state).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Gets a forecast, from NWS when reachable and Open-Meteo otherwise
    #[tool(description = "Retrieve a concise weather forecast for a location given its latitude and longitude in decimal degrees. Returns up to five National Weather Service forecast periods, or current conditions from Open-Meteo if NWS is unavailable.")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let text = self.tools.get_forecast(request.into()).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_tools_capability() {
        let weather = Weather::new(&WeatherConfig::default());
        let info = weather.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "weather");
    }

    #[test]
    fn registers_both_tools() {
        let weather = Weather::new(&WeatherConfig::default());
        let mut names: Vec<String> = weather
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["get_alerts", "get_forecast"]);
    }
}
