// Dashboard time ranges and axis labelling
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Day,
    Week,
    Month,
}

impl TimeRange {
    pub fn point_count(self) -> usize {
        match self {
            TimeRange::Day => 24,
            TimeRange::Week => 7,
            TimeRange::Month => 30,
        }
    }

    /// Spacing between consecutive points of a generated window.
    pub fn step(self) -> Duration {
        match self {
            TimeRange::Day => Duration::hours(1),
            TimeRange::Week | TimeRange::Month => Duration::days(1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
        }
    }

    /// Timestamps for a window of `point_count` points, the last one a full
    /// step before `now`.
    pub fn timestamps(self, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let count = self.point_count() as i32;
        (0..count)
            .map(|i| now - self.step() * (count - i))
            .collect()
    }

    /// Axis label: hour of day, weekday, or day/month.
    pub fn label(self, time: DateTime<Utc>) -> String {
        match self {
            TimeRange::Day => format!("{}:00", time.hour()),
            TimeRange::Week => WEEKDAYS[time.weekday().num_days_from_sunday() as usize].to_string(),
            TimeRange::Month => format!("{}/{}", time.day(), time.month()),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown time range {0:?}, expected day, week or month")]
pub struct UnknownTimeRange(pub String);

impl FromStr for TimeRange {
    type Err = UnknownTimeRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(TimeRange::Day),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            _ => Err(UnknownTimeRange(s.to_string())),
        }
    }
}
