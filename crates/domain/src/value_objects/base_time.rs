//! Publication base time value object
//!
//! The provider identifies every forecast or observation run by a
//! `base_date`/`base_time` pair. Requests must name a run that has already
//! been published, so the pair is derived from the current local time using
//! the provider's fixed publication schedule:
//!
//! - short-range forecasts are issued eight times a day, every three hours
//!   from 02:00 to 23:00;
//! - ultra-short-range observations for hour `H` become available at `H:40`.
//!
//! Both rules are pure functions of the supplied time. No timezone conversion
//! happens here; the caller passes a time already in the provider's zone.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minute of the hour at which the hourly observation becomes available
pub const OBSERVATION_PUBLISH_MINUTE: u32 = 40;

/// One row of the forecast publication schedule
///
/// A local time whose hour is below `before_hour` resolves to the run issued
/// at `slot_hour`, `day_offset` days from the local date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduleEntry {
    before_hour: u32,
    day_offset: i64,
    slot_hour: u32,
}

impl ScheduleEntry {
    const fn new(before_hour: u32, day_offset: i64, slot_hour: u32) -> Self {
        Self {
            before_hour,
            day_offset,
            slot_hour,
        }
    }
}

/// Scanned in order; the first entry whose threshold exceeds the hour wins.
const FORECAST_SCHEDULE: [ScheduleEntry; 9] = [
    ScheduleEntry::new(2, -1, 23),
    ScheduleEntry::new(5, 0, 2),
    ScheduleEntry::new(8, 0, 5),
    ScheduleEntry::new(11, 0, 8),
    ScheduleEntry::new(14, 0, 11),
    ScheduleEntry::new(17, 0, 14),
    ScheduleEntry::new(20, 0, 17),
    ScheduleEntry::new(23, 0, 20),
    ScheduleEntry::new(24, 0, 23),
];

/// A resolved `base_date`/`base_time` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseTime {
    date: NaiveDate,
    hour: u32,
}

impl BaseTime {
    /// Base time of the latest short-range forecast run published at `now`
    #[must_use]
    pub fn for_forecast(now: NaiveDateTime) -> Self {
        let hour = now.hour();
        let entry = FORECAST_SCHEDULE
            .iter()
            .find(|entry| hour < entry.before_hour)
            .copied()
            .unwrap_or(FORECAST_SCHEDULE[FORECAST_SCHEDULE.len() - 1]);

        let date = now.date();
        let date = if entry.day_offset < 0 {
            // Only fails at NaiveDate::MIN
            date.pred_opt().unwrap_or(date)
        } else {
            date
        };

        Self {
            date,
            hour: entry.slot_hour,
        }
    }

    /// Base time of the latest hourly observation published at `now`
    ///
    /// Before minute 40 the current hour is not yet available, so the previous
    /// hour is used, rolling back across midnight when needed.
    #[must_use]
    pub fn for_observation(now: NaiveDateTime) -> Self {
        let effective = if now.minute() < OBSERVATION_PUBLISH_MINUTE {
            now.checked_sub_signed(TimeDelta::hours(1)).unwrap_or(now)
        } else {
            now
        };

        Self {
            date: effective.date(),
            hour: effective.hour(),
        }
    }

    /// The run's calendar date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// The run's hour (minutes are always zero)
    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// `base_date` query value (`YYYYMMDD`)
    #[must_use]
    pub fn base_date(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    /// `base_time` query value (`HH00`)
    #[must_use]
    pub fn base_time(&self) -> String {
        format!("{:02}00", self.hour)
    }
}

impl fmt::Display for BaseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.base_date(), self.base_time())
    }
}
