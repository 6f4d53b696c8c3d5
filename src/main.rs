use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mcp_weather_fallback::{proxy, Weather, WeatherConfig, WeatherTools};
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "mcp-weather-fallback",
    version,
    about = "NWS weather tools with an Open-Meteo fallback"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the MCP tools over stdio (default).
    Stdio,

    /// Serve the tools as an HTTP proxy.
    Http {
        /// Address to listen on.
        #[arg(long, default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_weather_fallback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = WeatherConfig::from_env().context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Stdio) {
        Command::Stdio => {
            tracing::info!("Starting MCP weather server");

            let server = Weather::new(&config).serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;

            tracing::info!("Server shutdown complete");
        }
        Command::Http { bind } => {
            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("Failed to bind {bind}"))?;
            proxy::serve(listener, WeatherTools::new(&config)).await?;
        }
    }

    Ok(())
}
