//! Day-by-day collection of historical weather over a date range.

use crate::types::day_anchor::DayAnchor;
use crate::types::observation::{observations_to_frame, WeatherObservation};
use crate::weather_api::client::{parse_time_machine, TimeMachineSource};
use crate::weather_api::error::WeatherApiError;
use bon::bon;
use chrono::NaiveDate;
use log::{error, info, warn};
use polars::prelude::DataFrame;
use reqwest::StatusCode;
use std::thread;
use std::time::Duration;

pub const DEFAULT_RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(60);
pub const DEFAULT_COURTESY_DELAY: Duration = Duration::from_secs(1);

/// What a single request for one day turned into.
enum DayOutcome {
    Fetched(WeatherObservation),
    RateLimited,
    Skipped,
}

/// Walks a date range one day at a time, issuing one time-machine request per day.
///
/// Requests are strictly sequential and in increasing date order. A rate-limit response
/// (429) blocks for the backoff window and retries the same day; there is no retry cap,
/// so a server that never stops answering 429 stalls the collection indefinitely.
/// Any other failure skips the day, except a rejected credential (401), which aborts
/// the whole collection.
pub struct HistoricalCollector<S> {
    source: S,
    day_anchor: DayAnchor,
    rate_limit_backoff: Duration,
    courtesy_delay: Duration,
}

#[bon]
impl<S: TimeMachineSource> HistoricalCollector<S> {
    /// Creates a collector over `source`.
    ///
    /// * `day_anchor` - where a day starts, defaults to [`DayAnchor::Local`].
    /// * `rate_limit_backoff` - pause after a 429, defaults to 60 seconds.
    /// * `courtesy_delay` - pause between consecutive days, defaults to 1 second.
    #[builder]
    pub fn new(
        #[builder(start_fn)] source: S,
        day_anchor: Option<DayAnchor>,
        rate_limit_backoff: Option<Duration>,
        courtesy_delay: Option<Duration>,
    ) -> Self {
        Self {
            source,
            day_anchor: day_anchor.unwrap_or_default(),
            rate_limit_backoff: rate_limit_backoff.unwrap_or(DEFAULT_RATE_LIMIT_BACKOFF),
            courtesy_delay: courtesy_delay.unwrap_or(DEFAULT_COURTESY_DELAY),
        }
    }

    /// Collects every day in `start..=end` into a table.
    ///
    /// Columns: `date`, `temp`, `feels_like`, `humidity`, `clouds`, `wind_speed`,
    /// `weather_main`, `weather_desc`. Skipped days are simply absent, so callers must
    /// check the height rather than assume full coverage. `start > end` gives an empty
    /// table without touching the network.
    ///
    /// # Errors
    ///
    /// [`WeatherApiError::InvalidApiKey`] if the server rejects the credential on any
    /// day. Rows gathered before that point are discarded.
    pub fn collect(&self, start: NaiveDate, end: NaiveDate) -> Result<DataFrame, WeatherApiError> {
        let rows = self.collect_observations(start, end)?;
        Ok(observations_to_frame(&rows)?)
    }

    /// Same loop as [`collect`](Self::collect), returning the typed rows.
    pub fn collect_observations(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherObservation>, WeatherApiError> {
        if start <= end {
            info!("Fetching weather data from {} to {}...", start, end);
        }

        let mut rows = Vec::new();
        let mut current = start;

        while current <= end {
            match self.fetch_day(current)? {
                DayOutcome::RateLimited => {
                    warn!(
                        "Rate limit reached. Waiting {} seconds...",
                        self.rate_limit_backoff.as_secs()
                    );
                    thread::sleep(self.rate_limit_backoff);
                    continue;
                }
                DayOutcome::Fetched(row) => {
                    info!("✓ {}", current);
                    rows.push(row);
                }
                DayOutcome::Skipped => {}
            }

            match current.succ_opt() {
                Some(next) if next <= end => {
                    thread::sleep(self.courtesy_delay);
                    current = next;
                }
                _ => break,
            }
        }

        info!("Successfully fetched {} days of weather data", rows.len());
        Ok(rows)
    }

    /// Issues the request for one day and classifies the result.
    fn fetch_day(&self, date: NaiveDate) -> Result<DayOutcome, WeatherApiError> {
        let Some(timestamp) = self.day_anchor.timestamp(date) else {
            warn!("✗ {}", WeatherApiError::UnrepresentableDay(date));
            return Ok(DayOutcome::Skipped);
        };

        let response = match self.source.time_machine(timestamp) {
            Ok(response) => response,
            Err(e) => {
                warn!("✗ Error fetching data for {}: {}", date, e);
                return Ok(DayOutcome::Skipped);
            }
        };

        match response.status {
            StatusCode::OK => match parse_time_machine(date, &response.body) {
                Ok(row) => Ok(DayOutcome::Fetched(row)),
                Err(e) => {
                    warn!("✗ Error parsing data for {}: {}", date, e);
                    Ok(DayOutcome::Skipped)
                }
            },
            StatusCode::UNAUTHORIZED => {
                error!("OpenWeather rejected the API key while fetching {}", date);
                Err(WeatherApiError::InvalidApiKey)
            }
            StatusCode::TOO_MANY_REQUESTS => Ok(DayOutcome::RateLimited),
            status => {
                warn!("✗ Error {} for {}", status.as_u16(), date);
                Ok(DayOutcome::Skipped)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather_api::client::RawResponse;
    use polars::prelude::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::time::Duration;

    const DAY: i64 = 86_400;

    fn body(temp: f64, main: &str) -> String {
        format!(
            r#"{{"current": {{"temp": {temp}, "feels_like": {temp}, "humidity": 50,
                "clouds": 10, "wind_speed": 3.5,
                "weather": [{{"main": "{main}", "description": "{desc}"}}]}}}}"#,
            desc = main.to_lowercase()
        )
    }

    fn ok(temp: f64, main: &str) -> Result<RawResponse, WeatherApiError> {
        status(StatusCode::OK, &body(temp, main))
    }

    fn status(status: StatusCode, body: &str) -> Result<RawResponse, WeatherApiError> {
        Ok(RawResponse {
            status,
            body: body.to_string(),
        })
    }

    /// Replays canned responses in order and records every requested timestamp.
    struct ScriptedSource {
        responses: RefCell<VecDeque<Result<RawResponse, WeatherApiError>>>,
        calls: RefCell<Vec<i64>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<RawResponse, WeatherApiError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl TimeMachineSource for ScriptedSource {
        fn time_machine(&self, timestamp: i64) -> Result<RawResponse, WeatherApiError> {
            self.calls.borrow_mut().push(timestamp);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected request for {timestamp}"))
        }
    }

    fn collector(source: &ScriptedSource) -> HistoricalCollector<&ScriptedSource> {
        HistoricalCollector::builder(source)
            .day_anchor(DayAnchor::Utc)
            .rate_limit_backoff(Duration::ZERO)
            .courtesy_delay(Duration::ZERO)
            .build()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn ts(day: u32) -> i64 {
        DayAnchor::Utc.timestamp(d(day)).unwrap()
    }

    #[test]
    fn test_reversed_range_is_empty_without_requests() {
        let source = ScriptedSource::new(vec![]);
        let df = collector(&source).collect(d(5), d(1)).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 8);
        assert!(source.calls.borrow().is_empty());
    }

    #[test]
    fn test_one_request_per_day_in_order() {
        let source = ScriptedSource::new(vec![ok(30.0, "Snow"), ok(40.0, "Clear"), ok(50.0, "Rain")]);
        let df = collector(&source).collect(d(1), d(3)).unwrap();

        assert_eq!(*source.calls.borrow(), vec![ts(1), ts(2), ts(3)]);
        assert_eq!(df.height(), 3);
        let temps: Vec<Option<f64>> = df.column("temp").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(temps, vec![Some(30.0), Some(40.0), Some(50.0)]);
        let mains: Vec<Option<&str>> = df
            .column("weather_main")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(mains, vec![Some("Snow"), Some("Clear"), Some("Rain")]);
    }

    #[test]
    fn test_single_day_range() {
        let source = ScriptedSource::new(vec![ok(61.0, "Clouds")]);
        let rows = collector(&source).collect_observations(d(7), d(7)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, d(7));
        assert_eq!(*source.calls.borrow(), vec![ts(7)]);
    }

    #[test]
    fn test_failures_skip_the_day_and_continue() {
        let source = ScriptedSource::new(vec![
            ok(30.0, "Clear"),
            status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            status(StatusCode::NOT_FOUND, "{}"),
            Err(WeatherApiError::MissingConditions), // stands in for a transport failure
            status(StatusCode::OK, "not json"),
            ok(35.0, "Rain"),
        ]);
        let rows = collector(&source).collect_observations(d(1), d(6)).unwrap();

        assert_eq!(source.calls.borrow().len(), 6);
        assert_eq!(
            rows.iter().map(|r| r.date).collect::<Vec<_>>(),
            vec![d(1), d(6)]
        );
    }

    #[test]
    fn test_rate_limit_retries_the_same_day() {
        let source = ScriptedSource::new(vec![
            ok(30.0, "Clear"),
            status(StatusCode::TOO_MANY_REQUESTS, ""),
            status(StatusCode::TOO_MANY_REQUESTS, ""),
            ok(31.0, "Clear"),
            ok(32.0, "Clear"),
        ]);
        let rows = collector(&source).collect_observations(d(1), d(3)).unwrap();

        assert_eq!(
            *source.calls.borrow(),
            vec![ts(1), ts(2), ts(2), ts(2), ts(3)]
        );
        assert_eq!(
            rows.iter().map(|r| (r.date, r.temp)).collect::<Vec<_>>(),
            vec![(d(1), 30.0), (d(2), 31.0), (d(3), 32.0)]
        );
    }

    #[test]
    fn test_invalid_key_aborts_immediately() {
        let source = ScriptedSource::new(vec![
            ok(30.0, "Clear"),
            ok(31.0, "Clear"),
            status(StatusCode::UNAUTHORIZED, r#"{"cod": 401}"#),
        ]);
        let result = collector(&source).collect(d(1), d(10));

        assert!(matches!(result, Err(WeatherApiError::InvalidApiKey)));
        // Nothing after the rejected day was requested.
        assert_eq!(*source.calls.borrow(), vec![ts(1), ts(2), ts(3)]);
    }

    #[test]
    fn test_invalid_key_on_first_day() {
        let source = ScriptedSource::new(vec![status(StatusCode::UNAUTHORIZED, "")]);
        let result = collector(&source).collect_observations(d(1), d(3));
        assert!(matches!(result, Err(WeatherApiError::InvalidApiKey)));
        assert_eq!(source.calls.borrow().len(), 1);
    }

    #[test]
    fn test_dates_are_non_decreasing_across_month_boundary() {
        let source = ScriptedSource::new(vec![ok(1.0, "Clear"), ok(2.0, "Clear"), ok(3.0, "Clear")]);
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let rows = collector(&source).collect_observations(start, end).unwrap();

        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));

        let calls = source.calls.borrow();
        assert!(calls.windows(2).all(|w| w[1] - w[0] == DAY));
    }

    #[test]
    fn test_collect_frame_has_date_dtype() {
        let source = ScriptedSource::new(vec![ok(45.0, "Drizzle")]);
        let df = collector(&source).collect(d(2), d(2)).unwrap();
        assert_eq!(df.column("date").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("humidity").unwrap().dtype(), &DataType::Int32);
    }

    #[test]
    fn test_builder_defaults() {
        let source = ScriptedSource::new(vec![]);
        let collector = HistoricalCollector::builder(&source).build();
        assert_eq!(collector.rate_limit_backoff, Duration::from_secs(60));
        assert_eq!(collector.courtesy_delay, Duration::from_secs(1));
        assert_eq!(collector.day_anchor, DayAnchor::Local);
    }
}
