use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherApiError {
    // The only error that aborts a historical collection.
    #[error("Invalid API key: OpenWeather rejected the credential")]
    InvalidApiKey,

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}: {body}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse OpenWeather JSON")]
    JsonParse(#[from] serde_json::Error),

    #[error("OpenWeather response contained no weather conditions")]
    MissingConditions,

    #[error("Midnight of {0} does not exist in the configured timezone")]
    UnrepresentableDay(NaiveDate),

    #[error("Failed building weather DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
