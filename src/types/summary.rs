use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate statistics over a weather table.
///
/// Every metric is optional: it is only computed when the table carries the column it
/// is derived from (`temp_avg`, `precipitation` or `weather_main`). Serializing a summary
/// yields a mapping holding only the present metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WeatherSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_precip: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rainy_days: Option<u64>,
    /// Occurrences of each condition string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_distribution: Option<BTreeMap<String, u64>>,
}

impl WeatherSummary {
    /// `true` when none of the prerequisite columns were present.
    pub fn is_empty(&self) -> bool {
        *self == WeatherSummary::default()
    }
}
