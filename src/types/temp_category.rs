//! Defines the `TempCategory` enum, bucketing a daily average temperature (°F)
//! into the labels used as a categorical feature.

use std::fmt;

/// Coarse temperature bucket for a day's average temperature in degrees Fahrenheit.
///
/// Every bucket includes its lower bound:
///
/// | Category   | Range (°F)  |
/// |------------|-------------|
/// | `Freezing` | `< 32`      |
/// | `Cold`     | `[32, 50)`  |
/// | `Mild`     | `[50, 70)`  |
/// | `Warm`     | `[70, 85)`  |
/// | `Hot`      | `>= 85`     |
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum TempCategory {
    Freezing,
    Cold,
    Mild,
    Warm,
    Hot,
}

impl TempCategory {
    pub const FREEZING_BELOW: f64 = 32.0;
    pub const COLD_BELOW: f64 = 50.0;
    pub const MILD_BELOW: f64 = 70.0;
    pub const WARM_BELOW: f64 = 85.0;

    /// Buckets a temperature in degrees Fahrenheit.
    ///
    /// Returns `None` for `NaN`, which belongs to no bucket.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bikeshare_weather::TempCategory;
    ///
    /// assert_eq!(TempCategory::from_fahrenheit(20.0), Some(TempCategory::Freezing));
    /// assert_eq!(TempCategory::from_fahrenheit(32.0), Some(TempCategory::Cold));
    /// assert_eq!(TempCategory::from_fahrenheit(85.0), Some(TempCategory::Hot));
    /// assert_eq!(TempCategory::from_fahrenheit(f64::NAN), None);
    /// ```
    pub fn from_fahrenheit(temp: f64) -> Option<Self> {
        if temp.is_nan() {
            None
        } else if temp < Self::FREEZING_BELOW {
            Some(TempCategory::Freezing)
        } else if temp < Self::COLD_BELOW {
            Some(TempCategory::Cold)
        } else if temp < Self::MILD_BELOW {
            Some(TempCategory::Mild)
        } else if temp < Self::WARM_BELOW {
            Some(TempCategory::Warm)
        } else {
            Some(TempCategory::Hot)
        }
    }

    /// The label stored in the `temp_category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TempCategory::Freezing => "Freezing",
            TempCategory::Cold => "Cold",
            TempCategory::Mild => "Mild",
            TempCategory::Warm => "Warm",
            TempCategory::Hot => "Hot",
        }
    }
}

impl fmt::Display for TempCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
