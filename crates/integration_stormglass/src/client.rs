//! StormGlass point-forecast client
//!
//! Requests hourly marine forecasts and keeps only the hours for which the
//! preferred source reports every requested quantity.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::config::StormGlassConfig;
use crate::error::StormGlassError;
use crate::http::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::models::{ForecastPoint, Quantity, StormGlassForecastResponse, StormGlassPoint};

/// Quantities requested from the provider, comma-separated
pub const STORMGLASS_API_PARAMS: &str =
    "swellDirection,swellHeight,swellPeriod,waveDirection,waveHeight,windDirection,windSpeed";

/// Data source every normalized value is taken from
pub const STORMGLASS_API_SOURCE: &str = "noaa";

/// Source of normalized marine forecasts
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch hourly forecast points for a location
    ///
    /// Coordinates are forwarded as given. An empty list means the provider
    /// had no complete hour for the location.
    async fn fetch_points(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastPoint>, StormGlassError>;
}

/// StormGlass client over an injected [`HttpClient`]
#[derive(Clone)]
pub struct StormGlassClient {
    http: Arc<dyn HttpClient>,
    point_url: String,
    api_token: SecretString,
}

impl std::fmt::Debug for StormGlassClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StormGlassClient")
            .field("point_url", &self.point_url)
            .field("api_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl StormGlassClient {
    /// Create a client that sends requests through `http`
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>, config: &StormGlassConfig) -> Self {
        Self {
            http,
            point_url: config.point_url(),
            api_token: config.api_token.clone(),
        }
    }

    /// Create a client backed by [`ReqwestHttpClient`]
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn from_config(config: &StormGlassConfig) -> Result<Self, StormGlassError> {
        config.validate().map_err(StormGlassError::ClientRequest)?;

        let http = ReqwestHttpClient::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(Arc::new(http), config))
    }

    /// Build the point-forecast request for a location
    fn build_request(&self, latitude: f64, longitude: f64) -> HttpRequest {
        HttpRequest::new(self.point_url.as_str())
            .query("lat", latitude.to_string())
            .query("lng", longitude.to_string())
            .query("params", STORMGLASS_API_PARAMS)
            .query("source", STORMGLASS_API_SOURCE)
            .header("Authorization", self.api_token.expose_secret())
    }
}

#[async_trait]
impl ForecastProvider for StormGlassClient {
    #[instrument(skip(self), fields(lat = %latitude, lng = %longitude))]
    async fn fetch_points(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastPoint>, StormGlassError> {
        let request = self.build_request(latitude, longitude);
        debug!(url = %request.url, "Fetching point forecast");

        let body = self.http.get(&request).await?;

        let response: StormGlassForecastResponse = serde_json::from_value(body)
            .map_err(|e| StormGlassError::ClientRequest(e.to_string()))?;

        let points = normalize_response(&response, STORMGLASS_API_SOURCE);
        debug!(
            received = response.hours.len(),
            kept = points.len(),
            "Normalized point forecast"
        );

        Ok(points)
    }
}

/// Flatten every complete hour of `response` to a [`ForecastPoint`]
///
/// Incomplete hours are dropped; the remaining ones keep their order.
#[must_use]
pub fn normalize_response(
    response: &StormGlassForecastResponse,
    source: &str,
) -> Vec<ForecastPoint> {
    response
        .hours
        .iter()
        .filter_map(|point| to_forecast_point(point, source))
        .collect()
}

/// Returns true if `point` has a timestamp and a usable `source` value for
/// every quantity
///
/// A value of exactly `0` counts as missing.
#[must_use]
pub fn is_valid_point(point: &StormGlassPoint, source: &str) -> bool {
    to_forecast_point(point, source).is_some()
}

fn to_forecast_point(point: &StormGlassPoint, source: &str) -> Option<ForecastPoint> {
    let time = point.time.as_deref().filter(|t| !t.is_empty())?;
    let value = |quantity: Quantity| {
        point
            .value(quantity, source)
            .filter(|v| *v != 0.0 && !v.is_nan())
    };

    Some(ForecastPoint {
        time: time.to_string(),
        wave_height: value(Quantity::WaveHeight)?,
        wave_direction: value(Quantity::WaveDirection)?,
        swell_direction: value(Quantity::SwellDirection)?,
        swell_height: value(Quantity::SwellHeight)?,
        swell_period: value(Quantity::SwellPeriod)?,
        wind_direction: value(Quantity::WindDirection)?,
        wind_speed: value(Quantity::WindSpeed)?,
    })
}
