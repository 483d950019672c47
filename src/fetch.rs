use crate::config::ApiConfig;
use crate::types::observation::CurrentConditions;
use crate::weather_api::client::OpenWeatherClient;
use crate::weather_api::collector::HistoricalCollector;
use crate::weather_api::error::WeatherApiError;
use chrono::NaiveDate;
use polars::prelude::DataFrame;

/// Collects historical weather for every day in `start..=end` at the configured location.
///
/// Uses the default pacing: 1 second between days, 60 seconds after a rate-limit
/// response. Build a [`HistoricalCollector`] directly to change it.
///
/// # Errors
///
/// [`WeatherApiError::InvalidApiKey`] if OpenWeather rejects the key. Days that fail for
/// any other reason are skipped, so the table may have fewer rows than days requested.
///
/// # Example
///
/// ```no_run
/// use bikeshare_weather::{fetch_historical_weather, ApiConfig};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig::from_env()?;
/// let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
///
/// let weather = fetch_historical_weather(&config, start, end)?;
/// println!("Fetched {} of 7 days:\n{}", weather.height(), weather);
/// # Ok(())
/// # }
/// ```
pub fn fetch_historical_weather(
    config: &ApiConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DataFrame, WeatherApiError> {
    HistoricalCollector::builder(OpenWeatherClient::new(config))
        .day_anchor(config.day_anchor())
        .build()
        .collect(start, end)
}

/// Fetches the conditions right now at the configured location.
pub fn fetch_current_weather(config: &ApiConfig) -> Result<CurrentConditions, WeatherApiError> {
    OpenWeatherClient::new(config).current_conditions()
}
