//! Weather data for Washington, DC bikeshare analysis.
//!
//! Two sources feed the same tabular pipeline:
//!
//! * [`fetch_historical_weather`] / [`HistoricalCollector`] walk a date range against
//!   OpenWeather's time-machine endpoint, one request per day.
//! * [`load_climate_records`] reads a NOAA Climate Data Online CSV export.
//!
//! The resulting Polars tables go through [`categorize`] and [`summarize`], which only
//! touch the columns that are present.

mod climate;
mod columns;
mod config;
mod error;
mod features;
mod fetch;
mod types;
mod weather_api;

pub use error::WeatherError;
pub use fetch::*;

pub use config::{ApiConfig, ConfigError, API_KEY_ENV_VAR, DEFAULT_BASE_URL};

pub use climate::error::ClimateLoadError;
pub use climate::loader::{load_climate_records, normalize_climate_frame, COLUMN_MAPPING};
pub use features::categorize::{
    categorize, categorize_in_place, CLEAR_CONDITIONS, RAIN_CONDITIONS, SNOW_CONDITIONS,
};
pub use features::error::FeatureError;
pub use features::summary::summarize;
pub use weather_api::client::{OpenWeatherClient, RawResponse, TimeMachineSource};
pub use weather_api::collector::{
    HistoricalCollector, DEFAULT_COURTESY_DELAY, DEFAULT_RATE_LIMIT_BACKOFF,
};
pub use weather_api::error::WeatherApiError;

pub use types::day_anchor::DayAnchor;
pub use types::lat_lon::LatLon;
pub use types::observation::{observations_to_frame, CurrentConditions, WeatherObservation};
pub use types::summary::WeatherSummary;
pub use types::temp_category::TempCategory;

/// Canonical column names of the produced tables.
pub mod column_names {
    pub use crate::columns::*;
}
