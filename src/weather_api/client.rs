//! Blocking client for the two OpenWeather endpoints the crate uses: the historical
//! "time machine" query and the current-conditions query.

use crate::config::ApiConfig;
use crate::types::observation::{CurrentConditions, WeatherObservation};
use crate::weather_api::error::WeatherApiError;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

const UNITS: &str = "imperial";

/// Status and body of a response, before any interpretation.
///
/// The collector decides what a status means (retry, skip or abort), so the transport
/// hands it over untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Something that can answer a time-machine query for a single instant.
///
/// [`OpenWeatherClient`] is the real implementation; the collector only depends on
/// this trait.
pub trait TimeMachineSource {
    /// Issues one request for the conditions at `timestamp` (Unix seconds).
    ///
    /// An `Err` means the request never produced a response (connection, TLS,
    /// body read). Every HTTP status, including errors, is returned as `Ok`.
    fn time_machine(&self, timestamp: i64) -> Result<RawResponse, WeatherApiError>;
}

impl<T: TimeMachineSource + ?Sized> TimeMachineSource for &T {
    fn time_machine(&self, timestamp: i64) -> Result<RawResponse, WeatherApiError> {
        (**self).time_machine(timestamp)
    }
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwTimeMachineCurrent {
    temp: f64,
    feels_like: f64,
    humidity: i32,
    clouds: i32,
    wind_speed: f64,
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OwTimeMachineResponse {
    current: OwTimeMachineCurrent,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    wind: OwWind,
    weather: Vec<OwCondition>,
}

/// Parses a successful time-machine body into the row for `date`.
///
/// Main and description come from the first entry of the condition list.
pub fn parse_time_machine(date: NaiveDate, body: &str) -> Result<WeatherObservation, WeatherApiError> {
    let parsed: OwTimeMachineResponse = serde_json::from_str(body)?;
    let current = parsed.current;
    let condition = current
        .weather
        .into_iter()
        .next()
        .ok_or(WeatherApiError::MissingConditions)?;

    Ok(WeatherObservation {
        date,
        temp: current.temp,
        feels_like: current.feels_like,
        humidity: current.humidity,
        clouds: current.clouds,
        wind_speed: current.wind_speed,
        weather_main: condition.main,
        weather_desc: condition.description,
    })
}

/// Parses a current-weather body.
pub fn parse_current(body: &str) -> Result<CurrentConditions, WeatherApiError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or(WeatherApiError::MissingConditions)?;

    Ok(CurrentConditions {
        temp: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        humidity: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        weather_main: condition.main,
        weather_desc: condition.description,
    })
}

pub struct OpenWeatherClient {
    config: ApiConfig,
    http: Client,
}

impl OpenWeatherClient {
    /// Creates a client bound to `config`'s key, location and base URL.
    ///
    /// The key was validated when the config was built, so a client never
    /// exists without a credential.
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            config: config.clone(),
            http: Client::new(),
        }
    }

    fn get(&self, endpoint: &str, extra: &[(&str, String)]) -> Result<RawResponse, WeatherApiError> {
        let url = format!("{}/{}", self.config.base_url(), endpoint);
        let location = self.config.location();

        let mut query = vec![
            ("lat", location.lat().to_string()),
            ("lon", location.lon().to_string()),
        ];
        query.extend(extra.iter().cloned());
        query.push(("appid", self.config.api_key().to_string()));
        query.push(("units", UNITS.to_string()));

        debug!("GET {} ({:?})", url, extra);

        // The url in errors never carries the query string, so the key is not leaked.
        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .map_err(|e| WeatherApiError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| WeatherApiError::NetworkRequest(url, e))?;

        Ok(RawResponse { status, body })
    }

    /// Fetches the conditions at this moment for the configured location.
    ///
    /// # Errors
    ///
    /// [`WeatherApiError::InvalidApiKey`] on 401, [`WeatherApiError::HttpStatus`] on
    /// any other non-200 status, plus network and JSON errors.
    pub fn current_conditions(&self) -> Result<CurrentConditions, WeatherApiError> {
        let endpoint = "weather";
        let response = self.get(endpoint, &[])?;
        interpret_current(&format!("{}/{}", self.config.base_url(), endpoint), response)
    }
}

/// Maps a current-weather response to conditions or an error by status.
fn interpret_current(url: &str, response: RawResponse) -> Result<CurrentConditions, WeatherApiError> {
    match response.status {
        StatusCode::OK => parse_current(&response.body),
        StatusCode::UNAUTHORIZED => Err(WeatherApiError::InvalidApiKey),
        status => {
            warn!("Current weather request failed with status {}", status);
            Err(WeatherApiError::HttpStatus {
                url: url.to_string(),
                status,
                body: truncate_body(&response.body),
            })
        }
    }
}

impl TimeMachineSource for OpenWeatherClient {
    fn time_machine(&self, timestamp: i64) -> Result<RawResponse, WeatherApiError> {
        self.get("onecall/timemachine", &[("dt", timestamp.to_string())])
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
