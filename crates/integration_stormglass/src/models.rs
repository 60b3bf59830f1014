//! StormGlass data models
//!
//! Wire types for the point-forecast response and the flattened
//! [`ForecastPoint`] handed to callers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{DeserializeOwned, Error as _},
};

/// Physical quantity requested from the point-forecast endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Direction swell is coming from, degrees (0 = north)
    SwellDirection,
    /// Swell height, meters
    SwellHeight,
    /// Swell period, seconds
    SwellPeriod,
    /// Direction waves are coming from, degrees
    WaveDirection,
    /// Significant wave height, meters
    WaveHeight,
    /// Direction of wind at 10m above sea level, degrees
    WindDirection,
    /// Wind speed at 10m above sea level, meters per second
    WindSpeed,
}

impl Quantity {
    /// All quantities, in the order they are requested from the provider
    pub const ALL: [Self; 7] = [
        Self::SwellDirection,
        Self::SwellHeight,
        Self::SwellPeriod,
        Self::WaveDirection,
        Self::WaveHeight,
        Self::WindDirection,
        Self::WindSpeed,
    ];

    /// Parameter name used by the StormGlass API
    #[must_use]
    pub const fn api_name(&self) -> &'static str {
        match self {
            Self::SwellDirection => "swellDirection",
            Self::SwellHeight => "swellHeight",
            Self::SwellPeriod => "swellPeriod",
            Self::WaveDirection => "waveDirection",
            Self::WaveHeight => "waveHeight",
            Self::WindDirection => "windDirection",
            Self::WindSpeed => "windSpeed",
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Values of one quantity keyed by data source name (e.g. `noaa`, `sg`)
///
/// Kept as raw JSON values; anything that is not a number counts as missing.
pub type SourceValues = HashMap<String, serde_json::Value>;

/// Body of a point-forecast response
///
/// `hours` is required. Entries that are not objects are skipped, except
/// `null`, which rejects the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StormGlassForecastResponse {
    /// Hourly records
    #[serde(deserialize_with = "hour_records")]
    pub hours: Vec<StormGlassPoint>,
}

fn hour_records<'de, D>(deserializer: D) -> Result<Vec<StormGlassPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let mut hours = Vec::with_capacity(entries.len());

    for entry in entries {
        match entry {
            serde_json::Value::Null => {
                return Err(D::Error::custom("hour record must not be null"));
            },
            serde_json::Value::Object(_) => {
                hours.push(serde_json::from_value(entry).map_err(D::Error::custom)?);
            },
            _ => {},
        }
    }

    Ok(hours)
}

/// One hourly record as returned by the provider
///
/// Every field is optional: the provider may omit quantities or sources.
/// A field of the wrong JSON type is read as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StormGlassPoint {
    /// ISO 8601 timestamp
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub swell_direction: Option<SourceValues>,
    #[serde(default, deserialize_with = "lenient")]
    pub swell_height: Option<SourceValues>,
    #[serde(default, deserialize_with = "lenient")]
    pub swell_period: Option<SourceValues>,
    #[serde(default, deserialize_with = "lenient")]
    pub wave_direction: Option<SourceValues>,
    #[serde(default, deserialize_with = "lenient")]
    pub wave_height: Option<SourceValues>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind_direction: Option<SourceValues>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind_speed: Option<SourceValues>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl StormGlassPoint {
    /// Per-source values for a quantity, if the record has any
    #[must_use]
    pub const fn values(&self, quantity: Quantity) -> Option<&SourceValues> {
        match quantity {
            Quantity::SwellDirection => self.swell_direction.as_ref(),
            Quantity::SwellHeight => self.swell_height.as_ref(),
            Quantity::SwellPeriod => self.swell_period.as_ref(),
            Quantity::WaveDirection => self.wave_direction.as_ref(),
            Quantity::WaveHeight => self.wave_height.as_ref(),
            Quantity::WindDirection => self.wind_direction.as_ref(),
            Quantity::WindSpeed => self.wind_speed.as_ref(),
        }
    }

    /// Numeric value of a quantity reported by `source`
    #[must_use]
    pub fn value(&self, quantity: Quantity, source: &str) -> Option<f64> {
        self.values(quantity)?
            .get(source)
            .and_then(serde_json::Value::as_f64)
    }
}

/// Normalized forecast for one hour, every quantity from the same source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Timestamp as reported by the provider (ISO 8601)
    pub time: String,
    pub wave_height: f64,
    pub wave_direction: f64,
    pub swell_direction: f64,
    pub swell_height: f64,
    pub swell_period: f64,
    pub wind_direction: f64,
    pub wind_speed: f64,
}

impl ForecastPoint {
    /// Parse [`Self::time`] as an RFC 3339 timestamp in UTC
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Value of a single quantity
    #[must_use]
    pub const fn get(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::SwellDirection => self.swell_direction,
            Quantity::SwellHeight => self.swell_height,
            Quantity::SwellPeriod => self.swell_period,
            Quantity::WaveDirection => self.wave_direction,
            Quantity::WaveHeight => self.wave_height,
            Quantity::WindDirection => self.wind_direction,
            Quantity::WindSpeed => self.wind_speed,
        }
    }
}
