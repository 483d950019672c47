use crate::columns::*;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// One day of conditions returned by the historical (time-machine) endpoint.
///
/// Temperatures are in °F and wind speed in mph, the API's imperial unit system.
#[derive(Debug, PartialEq, Clone)]
pub struct WeatherObservation {
    pub date: NaiveDate,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i32, // percent
    pub clouds: i32,   // percent cloud cover
    pub wind_speed: f64,
    pub weather_main: String, // condition group, e.g. "Rain"
    pub weather_desc: String, // free text, e.g. "light rain"
}

/// Conditions right now, from the current-weather endpoint.
#[derive(Debug, PartialEq, Clone)]
pub struct CurrentConditions {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i32,
    pub wind_speed: f64,
    pub weather_main: String,
    pub weather_desc: String,
}

/// Builds the collector's output table, one row per observation in the given order.
///
/// An empty slice still yields every column with its proper dtype.
pub fn observations_to_frame(rows: &[WeatherObservation]) -> PolarsResult<DataFrame> {
    let days: Vec<i32> = rows
        .iter()
        .map(|r| r.date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
        .collect();

    DataFrame::new(vec![
        Column::new(COL_DATE.into(), days).cast(&DataType::Date)?,
        Column::new(COL_TEMP.into(), rows.iter().map(|r| r.temp).collect::<Vec<f64>>()),
        Column::new(
            COL_FEELS_LIKE.into(),
            rows.iter().map(|r| r.feels_like).collect::<Vec<f64>>(),
        ),
        Column::new(
            COL_HUMIDITY.into(),
            rows.iter().map(|r| r.humidity).collect::<Vec<i32>>(),
        ),
        Column::new(
            COL_CLOUDS.into(),
            rows.iter().map(|r| r.clouds).collect::<Vec<i32>>(),
        ),
        Column::new(
            COL_WIND_SPEED.into(),
            rows.iter().map(|r| r.wind_speed).collect::<Vec<f64>>(),
        ),
        Column::new(
            COL_WEATHER_MAIN.into(),
            rows.iter()
                .map(|r| r.weather_main.as_str())
                .collect::<Vec<&str>>(),
        ),
        Column::new(
            COL_WEATHER_DESC.into(),
            rows.iter()
                .map(|r| r.weather_desc.as_str())
                .collect::<Vec<&str>>(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(day: u32, main: &str) -> WeatherObservation {
        WeatherObservation {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            temp: 50.0 + day as f64,
            feels_like: 48.0,
            humidity: 60,
            clouds: 20,
            wind_speed: 5.5,
            weather_main: main.to_string(),
            weather_desc: main.to_lowercase(),
        }
    }

    #[test]
    fn test_frame_schema_and_order() -> Result<(), Box<dyn std::error::Error>> {
        let df = observations_to_frame(&[observation(1, "Clear"), observation(2, "Rain")])?;

        assert_eq!(df.height(), 2);
        assert_eq!(
            df.get_column_names()
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>(),
            vec![
                "date",
                "temp",
                "feels_like",
                "humidity",
                "clouds",
                "wind_speed",
                "weather_main",
                "weather_desc"
            ]
        );
        assert_eq!(df.column("date")?.dtype(), &DataType::Date);
        assert_eq!(df.column("humidity")?.dtype(), &DataType::Int32);

        // 2024-03-01 is day 19783 since the Unix epoch.
        let days = df.column("date")?.cast(&DataType::Int32)?;
        assert_eq!(days.i32()?.get(0), Some(19_783));
        assert_eq!(days.i32()?.get(1), Some(19_784));

        let mains = df.column("weather_main")?.str()?;
        assert_eq!(mains.get(1), Some("Rain"));
        Ok(())
    }

    #[test]
    fn test_empty_frame_keeps_columns() -> Result<(), Box<dyn std::error::Error>> {
        let df = observations_to_frame(&[])?;
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 8);
        assert_eq!(df.column("temp")?.dtype(), &DataType::Float64);
        assert_eq!(df.column("weather_main")?.dtype(), &DataType::String);
        Ok(())
    }
}
