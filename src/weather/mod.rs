pub mod client;
pub mod service;

pub use client::{OpenMeteoClient, WeatherSource};
pub use service::WeatherService;

use crate::error::{MeteoError, MeteoResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A requested location. Unknown fields are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

pub type WeatherRequest = Coordinates;

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn validate(&self) -> MeteoResult<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(MeteoError::invalid_input(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(MeteoError::invalid_input(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// Upstream forecast payload. Fields not modelled here are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    pub hourly: HourlySeries,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    #[serde(flatten)]
    pub forecast: Forecast,
    pub dates: Vec<NaiveDateTime>,
    pub mean_temperatures: Vec<f64>,
}

/// Request body for `POST /weather`: a single location or a batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WeatherPayload {
    Batch(Vec<WeatherRequest>),
    Single(WeatherRequest),
}
