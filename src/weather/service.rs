use super::{Coordinates, WeatherRequest, WeatherResponse, WeatherSource};
use crate::aggregation::{aggregate, samples_from_hourly};
use crate::error::{MeteoError, MeteoResult};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

/// Upper bound on upstream requests in flight for one batch.
pub const MAX_CONCURRENT_UPSTREAM_REQUESTS: usize = 4;

/// Fetches forecasts and attaches per-day mean temperatures.
#[derive(Clone)]
pub struct WeatherService {
    source: Arc<dyn WeatherSource>,
}

impl WeatherService {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source }
    }

    pub async fn create(&self, request: WeatherRequest) -> MeteoResult<WeatherResponse> {
        let span = info_span!(
            "weather",
            request_id = %uuid::Uuid::new_v4(),
            latitude = request.latitude,
            longitude = request.longitude,
        );
        self.create_inner(request).instrument(span).await
    }

    /// Processes a batch with at most [`MAX_CONCURRENT_UPSTREAM_REQUESTS`] in flight.
    /// Results keep the input order; the first error fails the batch.
    pub async fn create_many(
        &self,
        requests: Vec<WeatherRequest>,
    ) -> MeteoResult<Vec<WeatherResponse>> {
        stream::iter(requests)
            .map(|request| self.create(request))
            .buffered(MAX_CONCURRENT_UPSTREAM_REQUESTS)
            .try_collect()
            .await
    }

    async fn create_inner(&self, request: Coordinates) -> MeteoResult<WeatherResponse> {
        request.validate()?;

        let mut forecast = self.source.fetch_hourly(request).await?;
        let samples = samples_from_hourly(&forecast.hourly.time, &forecast.hourly.temperature_2m)
            .map_err(malformed_upstream)?;
        let daily = aggregate(&samples).map_err(malformed_upstream)?;

        info!(
            "Aggregated {} hourly samples into {} days",
            samples.len(),
            daily.len()
        );

        forecast.latitude = request.latitude;
        forecast.longitude = request.longitude;

        Ok(WeatherResponse {
            forecast,
            dates: daily.dates,
            mean_temperatures: daily.means,
        })
    }
}

/// Reports an unusable hourly series as an upstream fault.
fn malformed_upstream(err: MeteoError) -> MeteoError {
    warn!("Upstream sent unusable hourly data: {}", err);
    match err {
        MeteoError::InvalidInput { message } => MeteoError::Upstream {
            message: format!("malformed hourly series: {}", message),
        },
        other => other,
    }
}
