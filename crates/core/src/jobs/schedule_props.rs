//! Property-based tests for schedule fire-time computation.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use proptest::prelude::*;

use super::schedule::Schedule;

/// Strategy to generate instants between 2020 and 2060.
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..2_840_140_800i64)
        .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap_or_default())
}

fn wall_clock() -> impl Strategy<Value = (u32, u32)> {
    (0u32..24, 0u32..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The next daily fire is strictly after `after`, within one day,
    /// and lands on the requested wall-clock time.
    #[test]
    fn prop_daily_fire_time(after in instant(), (hour, minute) in wall_clock()) {
        let next = Schedule::Daily { hour, minute }.next_occurrence(after);
        prop_assert!(next > after);
        prop_assert!(next - after <= Duration::days(1));
        prop_assert_eq!(next.hour(), hour);
        prop_assert_eq!(next.minute(), minute);
    }

    /// The next monthly fire is strictly after `after` and lands on the
    /// requested day and wall-clock time.
    #[test]
    fn prop_monthly_fire_time(
        after in instant(),
        day in 1u32..=31,
        (hour, minute) in wall_clock(),
    ) {
        let next = Schedule::MonthlyOnDay { day, hour, minute }.next_occurrence(after);
        prop_assert!(next > after);
        prop_assert_eq!(next.day(), day);
        prop_assert_eq!(next.hour(), hour);
        prop_assert_eq!(next.minute(), minute);
    }

    /// Interval schedules advance by exactly the interval.
    #[test]
    fn prop_interval_advances_exactly(after in instant(), minutes in 1i64..10_000) {
        let next = Schedule::Every(Duration::minutes(minutes)).next_occurrence(after);
        prop_assert_eq!(next - after, Duration::minutes(minutes));
    }
}
