//! Summary statistics over a weather table.

use crate::columns::*;
use crate::features::error::FeatureError;
use crate::types::summary::WeatherSummary;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Computes the metrics whose source columns are present in `df`.
///
/// * `avg_temp`, `min_temp`, `max_temp` from `temp_avg`.
/// * `total_precip`, `rainy_days` (precipitation > 0) from `precipitation`.
/// * `weather_distribution` (condition → count) from `weather_main`.
///
/// A table with none of these columns gives an empty summary.
///
/// Nulls are left out of every aggregate. NaN is not treated like null, and the metrics
/// do not agree on it:
///
/// * `avg_temp` and `total_precip` are NaN as soon as one value is NaN.
/// * `min_temp` and `max_temp` skip NaN values and report the extremes of the rest.
/// * `rainy_days` counts NaN as not rainy.
///
/// A temperature column with no non-null values gives NaN for its three metrics. An
/// all-null precipitation column gives a total of 0.0 and 0 rainy days. Null conditions
/// are not counted in the distribution.
pub fn summarize(df: &DataFrame) -> Result<WeatherSummary, FeatureError> {
    let mut summary = WeatherSummary::default();

    if has_column(df, COL_TEMP_AVG) {
        let temps = float_column(df, COL_TEMP_AVG)?;
        let temps = temps.f64()?;
        summary.avg_temp = Some(temps.mean().unwrap_or(f64::NAN));
        summary.min_temp = Some(temps.min().unwrap_or(f64::NAN));
        summary.max_temp = Some(temps.max().unwrap_or(f64::NAN));
    }

    if has_column(df, COL_PRECIPITATION) {
        let precip = float_column(df, COL_PRECIPITATION)?;
        let precip = precip.f64()?;
        summary.total_precip = Some(precip.sum().unwrap_or(0.0));
        summary.rainy_days = Some(
            precip
                .into_iter()
                .filter(|p| matches!(p, Some(v) if *v > 0.0))
                .count() as u64,
        );
    }

    if has_column(df, COL_WEATHER_MAIN) {
        let conditions = df
            .column(COL_WEATHER_MAIN)?
            .str()
            .map_err(|e| FeatureError::ColumnType {
                column: COL_WEATHER_MAIN.to_string(),
                source: e,
            })?;
        let mut distribution = BTreeMap::new();
        for condition in conditions.into_iter().flatten() {
            *distribution.entry(condition.to_string()).or_insert(0) += 1;
        }
        summary.weather_distribution = Some(distribution);
    }

    Ok(summary)
}

fn float_column(df: &DataFrame, name: &str) -> Result<Column, FeatureError> {
    df.column(name)?
        .strict_cast(&DataType::Float64)
        .map_err(|e| FeatureError::ColumnType {
            column: name.to_string(),
            source: e,
        })
}
