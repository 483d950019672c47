//! Categorical features derived from temperature and condition columns.

use crate::columns::*;
use crate::features::error::FeatureError;
use crate::types::temp_category::TempCategory;
use log::warn;
use polars::prelude::*;

/// Condition strings counted as clear weather.
pub const CLEAR_CONDITIONS: [&str; 1] = ["Clear"];
/// Condition strings counted as rain.
pub const RAIN_CONDITIONS: [&str; 3] = ["Rain", "Drizzle", "Thunderstorm"];
/// Condition strings counted as snow.
pub const SNOW_CONDITIONS: [&str; 2] = ["Snow", "Sleet"];

/// Returns a copy of `df` with categorical features added.
///
/// Each feature is derived only when its input column exists, so this works on tables
/// from either source:
///
/// * `temp_category` (str) from `temp_avg`, see [`TempCategory`]. Null or NaN
///   temperatures give a null category.
/// * `is_clear`, `is_rainy`, `is_snowy` (bool) from `weather_main`, by exact,
///   case-sensitive membership. A null condition gives `false`.
///
/// Existing feature columns are overwritten, which makes the operation idempotent.
///
/// Climate records already carry a precipitation-based `is_rainy`. When the table holds
/// both `precipitation` and `weather_main`, the condition-based flag replaces it and a
/// warning is logged; the two definitions are not reconciled.
pub fn categorize(df: &DataFrame) -> Result<DataFrame, FeatureError> {
    let mut out = df.clone();

    if has_column(&out, COL_TEMP_AVG) {
        let categories = temp_categories(out.column(COL_TEMP_AVG)?)?;
        out.with_column(categories)?;
    }

    if has_column(&out, COL_WEATHER_MAIN) {
        if has_column(&out, COL_PRECIPITATION) && has_column(&out, COL_IS_RAINY) {
            warn!(
                "Overwriting precipitation-based '{}' with the condition-based definition",
                COL_IS_RAINY
            );
        }
        out = out
            .lazy()
            .with_columns([
                membership(&CLEAR_CONDITIONS).alias(COL_IS_CLEAR),
                membership(&RAIN_CONDITIONS).alias(COL_IS_RAINY),
                membership(&SNOW_CONDITIONS).alias(COL_IS_SNOWY),
            ])
            .collect()?;
    }

    Ok(out)
}

/// In-place form of [`categorize`], producing the same columns.
pub fn categorize_in_place(df: &mut DataFrame) -> Result<(), FeatureError> {
    *df = categorize(df)?;
    Ok(())
}

fn temp_categories(temp_avg: &Column) -> Result<Column, FeatureError> {
    let temps = temp_avg
        .strict_cast(&DataType::Float64)
        .map_err(|e| FeatureError::ColumnType {
            column: COL_TEMP_AVG.to_string(),
            source: e,
        })?;
    let labels: Vec<Option<&'static str>> = temps
        .f64()?
        .into_iter()
        .map(|t| t.and_then(TempCategory::from_fahrenheit).map(|c| c.as_str()))
        .collect();
    Ok(Column::new(COL_TEMP_CATEGORY.into(), labels))
}

/// `weather_main` equals one of `conditions`.
fn membership(conditions: &[&str]) -> Expr {
    conditions
        .iter()
        .map(|c| col(COL_WEATHER_MAIN).eq(lit(*c)))
        .reduce(|acc, e| acc.or(e))
        .unwrap_or_else(|| lit(false))
        .fill_null(lit(false))
}
