//! Canonical column names shared by the collector, the loader and the feature pipeline.

pub const COL_DATE: &str = "date";

// Historical API rows
pub const COL_TEMP: &str = "temp";
pub const COL_FEELS_LIKE: &str = "feels_like";
pub const COL_HUMIDITY: &str = "humidity";
pub const COL_CLOUDS: &str = "clouds";
pub const COL_WIND_SPEED: &str = "wind_speed";
pub const COL_WEATHER_MAIN: &str = "weather_main";
pub const COL_WEATHER_DESC: &str = "weather_desc";

// Climate records
pub const COL_TEMP_MAX: &str = "temp_max";
pub const COL_TEMP_MIN: &str = "temp_min";
pub const COL_PRECIPITATION: &str = "precipitation";
pub const COL_SNOW: &str = "snow";
pub const COL_SNOW_DEPTH: &str = "snow_depth";
pub const COL_TEMP_AVG: &str = "temp_avg";

// Derived features
pub const COL_TEMP_CATEGORY: &str = "temp_category";
pub const COL_IS_CLEAR: &str = "is_clear";
pub const COL_IS_RAINY: &str = "is_rainy";
pub const COL_IS_SNOWY: &str = "is_snowy";

/// Days between 0001-01-01 (CE day 1) and the Unix epoch, the origin of Polars' `Date`.
pub(crate) const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub(crate) fn has_column(df: &polars::prelude::DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}
