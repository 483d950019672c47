//! Conversion from calendar days to the Unix timestamps the time-machine endpoint expects.

use chrono::{FixedOffset, Local, NaiveDate, TimeZone, Utc};

/// The timezone whose midnight marks the start of a requested day.
///
/// The remote API only takes an instant, so the same calendar date maps to different
/// timestamps depending on where "midnight" is taken. `Local` follows the machine's
/// timezone and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayAnchor {
    /// Midnight in the process' local timezone.
    #[default]
    Local,
    /// Midnight UTC.
    Utc,
    /// Midnight at a fixed offset from UTC, e.g. `-05:00` for US Eastern standard time.
    Fixed(FixedOffset),
}

impl DayAnchor {
    /// Returns the Unix timestamp (seconds) of midnight on `date` in this anchor's timezone.
    ///
    /// Returns `None` when that midnight does not exist locally (a DST gap).
    /// When midnight is ambiguous the earlier instant is used.
    ///
    /// # Examples
    ///
    /// ```
    /// use bikeshare_weather::DayAnchor;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// assert_eq!(DayAnchor::Utc.timestamp(day), Some(1_704_067_200));
    /// ```
    pub fn timestamp(&self, date: NaiveDate) -> Option<i64> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        match self {
            DayAnchor::Local => Local
                .from_local_datetime(&midnight)
                .earliest()
                .map(|dt| dt.timestamp()),
            DayAnchor::Utc => Some(Utc.from_utc_datetime(&midnight).timestamp()),
            DayAnchor::Fixed(offset) => offset
                .from_local_datetime(&midnight)
                .single()
                .map(|dt| dt.timestamp()),
        }
    }
}
