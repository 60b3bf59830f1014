//! StormGlass client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the StormGlass client
#[derive(Clone, Serialize, Deserialize)]
pub struct StormGlassConfig {
    /// StormGlass API base URL (default: <https://api.stormglass.io/v2>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API token sent in the `Authorization` header (sensitive - uses `SecretString`)
    #[serde(skip_serializing)]
    pub api_token: SecretString,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for StormGlassConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StormGlassConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.stormglass.io/v2".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl StormGlassConfig {
    /// Create a configuration with default endpoint and timeout
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_token: SecretString::from(api_token.into()),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Get the API token as a string reference
    #[must_use]
    pub fn api_token(&self) -> &str {
        self.api_token.expose_secret()
    }

    /// URL of the point-forecast resource
    #[must_use]
    pub fn point_url(&self) -> String {
        format!("{}/weather/point", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.api_token().trim().is_empty() {
            return Err("api_token must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = StormGlassConfig::new("token");
        assert_eq!(config.base_url, "https://api.stormglass.io/v2");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_token(), "token");
    }

    #[test]
    fn test_point_url() {
        let config = StormGlassConfig::new("token");
        assert_eq!(
            config.point_url(),
            "https://api.stormglass.io/v2/weather/point"
        );

        let config = StormGlassConfig {
            base_url: "http://127.0.0.1:8080/".to_string(),
            ..StormGlassConfig::new("token")
        };
        assert_eq!(config.point_url(), "http://127.0.0.1:8080/weather/point");
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: StormGlassConfig =
            serde_json::from_str(r#"{ "api_token": "secret" }"#).unwrap();
        assert_eq!(config.base_url, "https://api.stormglass.io/v2");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_token(), "secret");
    }

    #[test]
    fn test_token_is_never_serialized_or_printed() {
        let config = StormGlassConfig::new("super-secret");

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));

        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_validation_success() {
        assert!(StormGlassConfig::new("token").validate().is_ok());
    }

    #[test]
    fn test_validation_empty_token() {
        assert!(StormGlassConfig::new("  ").validate().is_err());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = StormGlassConfig {
            timeout_secs: 0,
            ..StormGlassConfig::new("token")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = StormGlassConfig {
            base_url: String::new(),
            ..StormGlassConfig::new("token")
        };
        assert!(config.validate().is_err());
    }
}
