use super::{Coordinates, Forecast};
use crate::error::{MeteoError, MeteoResult};
use crate::MeteoConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

const HOURLY_VARIABLE: &str = "temperature_2m";

/// Source of hourly temperature forecasts for a location.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_hourly(&self, coords: Coordinates) -> MeteoResult<Forecast>;
}

pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> MeteoResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &MeteoConfig) -> MeteoResult<Self> {
        Self::new(config.weather_api_url.clone(), config.upstream_timeout())
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn fetch_hourly(&self, coords: Coordinates) -> MeteoResult<Forecast> {
        debug!(
            "Fetching hourly forecast for ({}, {}) from {}",
            coords.latitude, coords.longitude, self.base_url
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("hourly", HOURLY_VARIABLE.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upstream returned {}: {}", status, body);
            return Err(MeteoError::Upstream {
                message: format!("forecast request failed with status {}", status),
            });
        }

        let body = response.bytes().await?;
        let forecast: Forecast = serde_json::from_slice(&body)?;
        debug!("Received {} hourly samples", forecast.hourly.time.len());

        Ok(forecast)
    }
}
