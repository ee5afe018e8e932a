pub mod auth;

pub use auth::TokenGuard;

use crate::error::MeteoError;
use crate::weather::{WeatherPayload, WeatherService};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, warn};

#[derive(Clone)]
pub struct AppState {
    pub weather: WeatherService,
    pub guard: Arc<TokenGuard>,
}

impl AppState {
    pub fn new(weather: WeatherService, guard: TokenGuard) -> Self {
        Self {
            weather,
            guard: Arc::new(guard),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for MeteoError {
    fn into_response(self) -> Response {
        let status = match &self {
            MeteoError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            MeteoError::Unauthorized => StatusCode::UNAUTHORIZED,
            MeteoError::Upstream { .. } | MeteoError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let weather_routes = Router::new()
        .route("/weather", post(create_weather))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/health", get(health_check))
        .merge(weather_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .into_inner(),
        )
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, MeteoError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    state.guard.verify(authorization)?;

    Ok(next.run(request).await)
}

async fn create_weather(
    State(state): State<AppState>,
    Json(payload): Json<WeatherPayload>,
) -> Result<Response, MeteoError> {
    let response = match payload {
        WeatherPayload::Single(request) => {
            let weather = state.weather.create(request).await?;
            (StatusCode::CREATED, Json(weather)).into_response()
        }
        WeatherPayload::Batch(requests) => {
            let weather = state.weather.create_many(requests).await?;
            (StatusCode::CREATED, Json(weather)).into_response()
        }
    };

    Ok(response)
}
