//! Explicit, read-once configuration for the OpenWeather client.

use crate::types::day_anchor::DayAnchor;
use crate::types::lat_lon::LatLon;
use bon::bon;
use std::fmt;
use thiserror::Error;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV_VAR: &str = "OPENWEATHER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key not found. Set {0} in the environment or a .env file")]
    MissingApiKey(&'static str),
}

/// Credentials and request parameters shared by every OpenWeather call.
///
/// Built once at startup and never re-read: there is no global key, the value is passed
/// to whatever needs it. Units are always imperial (°F, mph).
#[derive(Clone, PartialEq)]
pub struct ApiConfig {
    api_key: String,
    location: LatLon,
    base_url: String,
    day_anchor: DayAnchor,
}

#[bon]
impl ApiConfig {
    /// Creates a configuration from an explicit key.
    ///
    /// Location defaults to [`LatLon::WASHINGTON_DC`], the base URL to the public
    /// OpenWeather 2.5 API, and days are anchored at local midnight.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if the key is empty or only whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use bikeshare_weather::{ApiConfig, DayAnchor, LatLon};
    ///
    /// let config = ApiConfig::builder("my-key")
    ///     .day_anchor(DayAnchor::Utc)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.location(), LatLon::WASHINGTON_DC);
    ///
    /// assert!(ApiConfig::builder("  ").build().is_err());
    /// ```
    #[builder]
    pub fn new(
        #[builder(start_fn, into)] api_key: String,
        location: Option<LatLon>,
        #[builder(into)] base_url: Option<String>,
        day_anchor: Option<DayAnchor>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey(API_KEY_ENV_VAR));
        }
        Ok(Self {
            api_key,
            location: location.unwrap_or_default(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            day_anchor: day_anchor.unwrap_or_default(),
        })
    }

    /// Reads the key from `OPENWEATHER_API_KEY`, loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine, the variable may be set directly.
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a default configuration from a variable lookup, e.g. `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key =
            lookup(API_KEY_ENV_VAR).ok_or(ConfigError::MissingApiKey(API_KEY_ENV_VAR))?;
        Self::builder(api_key).build()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn day_anchor(&self) -> DayAnchor {
        self.day_anchor
    }
}

// Keeps the key out of logs and panic messages.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("location", &self.location)
            .field("base_url", &self.base_url)
            .field("day_anchor", &self.day_anchor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::builder("KEY").build().unwrap();
        assert_eq!(config.api_key(), "KEY");
        assert_eq!(config.location(), LatLon(38.9072, -77.0369));
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.day_anchor(), DayAnchor::Local);
    }

    #[test]
    fn test_overrides() {
        let eastern = DayAnchor::Fixed(FixedOffset::west_opt(5 * 3600).unwrap());
        let config = ApiConfig::builder("KEY")
            .location(LatLon(40.7128, -74.0060))
            .base_url("http://localhost:8080/")
            .day_anchor(eastern)
            .build()
            .unwrap();
        assert_eq!(config.location(), LatLon(40.7128, -74.0060));
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.day_anchor(), eastern);
    }

    #[test]
    fn test_blank_key_is_rejected() {
        for key in ["", "   ", "\n"] {
            assert_eq!(
                ApiConfig::builder(key).build(),
                Err(ConfigError::MissingApiKey(API_KEY_ENV_VAR))
            );
        }
    }

    #[test]
    fn test_from_lookup() {
        let config = ApiConfig::from_lookup(|name| {
            (name == API_KEY_ENV_VAR).then(|| "  FROM_ENV ".to_string())
        })
        .unwrap();
        assert_eq!(config.api_key(), "FROM_ENV");

        let err = ApiConfig::from_lookup(|_| None).unwrap_err();
        assert!(err.to_string().contains("OPENWEATHER_API_KEY"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ApiConfig::builder("SECRET").build().unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("SECRET"));
        assert!(debug.contains("<redacted>"));
    }
}
