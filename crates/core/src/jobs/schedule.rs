//! Recurring schedule descriptions.
//!
//! Fire times are computed here, purely, so job bodies stay testable
//! independent of any particular scheduler runtime.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// When a recurring job fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Every day at the given UTC wall-clock time.
    Daily {
        /// Hour of day (0-23).
        hour: u32,
        /// Minute of hour (0-59).
        minute: u32,
    },
    /// Every month on the given day at the given UTC wall-clock time.
    /// Months without that day are skipped.
    MonthlyOnDay {
        /// Day of month (1-31).
        day: u32,
        /// Hour of day (0-23).
        hour: u32,
        /// Minute of hour (0-59).
        minute: u32,
    },
    /// Every fixed interval, measured from the previous fire time.
    Every(Duration),
}

impl Schedule {
    /// The first fire time strictly after `after`.
    #[must_use]
    pub fn next_occurrence(&self, after: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Self::Every(interval) => after + interval,
            Self::Daily { hour, minute } => {
                let time = wall_time(hour, minute);
                let mut candidate = after.date_naive().and_time(time).and_utc();
                if candidate <= after {
                    candidate += Duration::days(1);
                }
                candidate
            }
            Self::MonthlyOnDay { day, hour, minute } => {
                let time = wall_time(hour, minute);
                let start = after.date_naive();
                // At most 13 months until a (year, month, day) exists
                // and lies after `after`.
                for offset in 0..=13u32 {
                    let months = start.month0() + offset;
                    let year = start.year() + i32::try_from(months / 12).unwrap_or(0);
                    let month = months % 12 + 1;
                    if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                        let candidate = date.and_time(time).and_utc();
                        if candidate > after {
                            return candidate;
                        }
                    }
                }
                after + Duration::days(1)
            }
        }
    }
}

fn wall_time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}
