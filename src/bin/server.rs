use meteo::{
    api::{self, AppState, TokenGuard},
    weather::{OpenMeteoClient, WeatherService},
    MeteoConfig,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting meteo server");

    // Load configuration from environment
    let config = MeteoConfig::from_env();

    info!("Bind address: {}", config.bind_address);
    info!("Upstream: {}", config.weather_api_url);
    info!("Upstream timeout: {}s", config.upstream_timeout_seconds);

    let guard = TokenGuard::new(config.api_token.as_deref());
    if !guard.is_enabled() {
        warn!("API_TOKEN is not set; /weather accepts unauthenticated requests");
    }

    let client = OpenMeteoClient::from_config(&config)?;
    let state = AppState::new(WeatherService::new(Arc::new(client)), guard);
    let app = api::router(state);

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
