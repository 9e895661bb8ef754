use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use prefetch_core::models::DayType;

/// Signals derived from the local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalSignals {
    /// Hour of day (0–23).
    pub hour_of_day: u32,
    /// Day of week (Mon=1 .. Sun=7, ISO).
    pub day_of_week: u32,
}

impl TemporalSignals {
    pub fn new(hour_of_day: u32, day_of_week: u32) -> Self {
        Self {
            hour_of_day,
            day_of_week,
        }
    }

    /// Signals for the current local time.
    pub fn gather() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>) -> Self {
        Self {
            hour_of_day: time.hour(),
            day_of_week: time.weekday().number_from_monday(),
        }
    }

    pub fn day_type(&self) -> DayType {
        DayType::of_iso_weekday(self.day_of_week)
    }
}

impl Default for TemporalSignals {
    fn default() -> Self {
        Self::gather()
    }
}
