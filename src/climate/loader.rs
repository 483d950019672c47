//! Loads NOAA Climate Data Online daily summaries (CSV) into the canonical climate schema.

use crate::climate::error::ClimateLoadError;
use crate::columns::*;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use log::info;
use polars::prelude::*;
use std::path::Path;

/// Date column every NOAA export carries.
pub const SOURCE_DATE: &str = "DATE";

/// NOAA element codes and the canonical column each one becomes.
pub const COLUMN_MAPPING: [(&str, &str); 6] = [
    ("TMAX", COL_TEMP_MAX),
    ("TMIN", COL_TEMP_MIN),
    ("PRCP", COL_PRECIPITATION),
    ("AWND", COL_WIND_SPEED),
    ("SNOW", COL_SNOW),
    ("SNWD", COL_SNOW_DEPTH),
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Reads a NOAA CSV export and normalizes it.
///
/// The file needs a `DATE` column; `TMAX`, `TMIN`, `PRCP`, `AWND`, `SNOW` and `SNWD` are
/// picked up when present and renamed (see [`COLUMN_MAPPING`]). Any other source column
/// is dropped. Derived columns are computed right away:
///
/// * `temp_avg` = mean of `temp_max` and `temp_min`, if both exist.
/// * `is_rainy` = `precipitation > 0`, if precipitation exists.
///
/// Missing optional columns are simply absent from the output, never null-filled.
///
/// # Errors
///
/// Fails without returning a partial table if the file cannot be read as CSV, has no
/// `DATE` column, has a `DATE` value that is empty or unparsable, or has a mapped column
/// that is not numeric.
pub fn load_climate_records(path: impl AsRef<Path>) -> Result<DataFrame, ClimateLoadError> {
    let path = path.as_ref();
    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| ClimateLoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let df = normalize(&raw, path)?;
    info!(
        "Loaded {} climate records with columns {:?} from {}",
        df.height(),
        df.get_column_names(),
        path.display()
    );
    Ok(df)
}

/// Normalizes a frame already holding NOAA columns, e.g. one read from another source.
///
/// Same rules and errors as [`load_climate_records`].
pub fn normalize_climate_frame(raw: &DataFrame) -> Result<DataFrame, ClimateLoadError> {
    normalize(raw, Path::new("<in-memory>"))
}

fn normalize(raw: &DataFrame, path: &Path) -> Result<DataFrame, ClimateLoadError> {
    let date_column = raw
        .column(SOURCE_DATE)
        .map_err(|_| ClimateLoadError::MissingColumn {
            path: path.to_path_buf(),
            column: SOURCE_DATE.to_string(),
        })?;

    let mut columns = vec![Column::new(COL_DATE.into(), parse_dates(date_column, path)?)
        .cast(&DataType::Date)?];

    for (source, target) in COLUMN_MAPPING {
        if !has_column(raw, source) {
            continue;
        }
        let values = raw
            .column(source)?
            .strict_cast(&DataType::Float64)
            .map_err(|e| ClimateLoadError::NonNumericColumn {
                path: path.to_path_buf(),
                column: source.to_string(),
                source: e,
            })?;
        columns.push(values.with_name(target.into()));
    }

    let df = DataFrame::new(columns)?;

    let mut derived = Vec::new();
    if has_column(&df, COL_TEMP_MAX) && has_column(&df, COL_TEMP_MIN) {
        derived.push(((col(COL_TEMP_MAX) + col(COL_TEMP_MIN)) / lit(2.0)).alias(COL_TEMP_AVG));
    }
    if has_column(&df, COL_PRECIPITATION) {
        derived.push(col(COL_PRECIPITATION).gt(lit(0.0)).alias(COL_IS_RAINY));
    }

    if derived.is_empty() {
        return Ok(df);
    }
    Ok(df.lazy().with_columns(derived).collect()?)
}

/// Converts every `DATE` value to days since the Unix epoch.
fn parse_dates(column: &Column, path: &Path) -> Result<Vec<i32>, ClimateLoadError> {
    let text = column.cast(&DataType::String)?;
    text.str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .and_then(parse_date)
                .map(|date| date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
                .ok_or_else(|| ClimateLoadError::DateParse {
                    path: path.to_path_buf(),
                    row,
                    value: value.map(str::to_string),
                })
        })
        .collect()
}

/// Parses a date or date-time string, keeping only the calendar date.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
