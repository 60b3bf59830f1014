//! StormGlass marine weather integration
//!
//! Client for the StormGlass point-forecast API (<https://stormglass.io>).
//! Fetches hourly marine forecasts and flattens the provider's per-source
//! values into [`ForecastPoint`]s taken from a single preferred source.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_stormglass::{ForecastProvider, StormGlassClient, StormGlassConfig};
//!
//! let client = StormGlassClient::from_config(&config)?;
//! let points = client.fetch_points(-33.792726, 151.289824).await?;
//! ```

pub mod client;
mod config;
mod error;
pub mod http;
mod models;

pub use client::{
    ForecastProvider, STORMGLASS_API_PARAMS, STORMGLASS_API_SOURCE, StormGlassClient,
    is_valid_point, normalize_response,
};
pub use config::StormGlassConfig;
pub use error::{HttpError, HttpErrorResponse, StormGlassError};
pub use http::{HttpClient, HttpRequest, ReqwestHttpClient};
pub use models::{
    ForecastPoint, Quantity, SourceValues, StormGlassForecastResponse, StormGlassPoint,
};
