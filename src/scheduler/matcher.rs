use chrono::{DateTime, Datelike, Timelike, Weekday};
use chrono_tz::Tz;

use crate::schedules::Schedule;

pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Entries firing at this local instant: same day name, same hour, same
/// minute. Seconds are ignored; there is no look-back window, so the
/// caller's invocation cadence decides whether a minute can be missed.
pub fn due_entries<'a>(local: &DateTime<Tz>, schedules: &'a [Schedule]) -> Vec<&'a Schedule> {
    let day = day_name(local.weekday());
    schedules
        .iter()
        .filter(|s| {
            s.day_of_week == day
                && u32::from(s.time_of_day.hour()) == local.hour()
                && u32::from(s.time_of_day.minute()) == local.minute()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::clock::{local_time, resolve_zone};
    use chrono::{TimeZone, Utc};
    use time::macros::time;
    use uuid::Uuid;

    fn entry(day: &str, at: time::Time) -> Schedule {
        Schedule {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            day_of_week: day.to_string(),
            time_of_day: at,
        }
    }

    // 2024-09-16 is a Monday.
    fn monday_utc(hour: u32, minute: u32, second: u32) -> DateTime<Tz> {
        let now = Utc
            .with_ymd_and_hms(2024, 9, 16, hour, minute, second)
            .unwrap();
        local_time(resolve_zone("UTC"), now)
    }

    #[test]
    fn fires_on_exact_day_and_minute() {
        let schedules = vec![entry("Monday", time!(09:00))];
        let due = due_entries(&monday_utc(9, 0, 0), &schedules);
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn seconds_are_ignored() {
        let schedules = vec![entry("Monday", time!(09:00))];
        assert_eq!(due_entries(&monday_utc(9, 0, 59), &schedules).len(), 1);
    }

    #[test]
    fn adjacent_minute_does_not_fire() {
        let schedules = vec![entry("Monday", time!(09:00))];
        assert!(due_entries(&monday_utc(9, 1, 0), &schedules).is_empty());
        assert!(due_entries(&monday_utc(8, 59, 0), &schedules).is_empty());
    }

    #[test]
    fn other_days_do_not_fire() {
        let schedules = vec![entry("Tuesday", time!(09:00))];
        assert!(due_entries(&monday_utc(9, 0, 0), &schedules).is_empty());
    }

    #[test]
    fn multiple_matching_entries_all_fire() {
        // Legacy data may carry duplicates; each fires independently.
        let schedules = vec![
            entry("Monday", time!(09:00)),
            entry("Monday", time!(09:00)),
            entry("Monday", time!(18:30)),
        ];
        assert_eq!(due_entries(&monday_utc(9, 0, 0), &schedules).len(), 2);
    }

    #[test]
    fn matching_happens_in_the_users_zone() {
        // Monday 09:00 in Tokyo is Monday 00:00 UTC.
        let schedules = vec![entry("Monday", time!(09:00))];
        let now = Utc.with_ymd_and_hms(2024, 9, 16, 0, 0, 0).unwrap();
        let local = local_time(resolve_zone("Asia/Tokyo"), now);
        assert_eq!(due_entries(&local, &schedules).len(), 1);
        assert!(due_entries(&monday_utc(0, 0, 0), &schedules).is_empty());
    }

    #[test]
    fn day_names_are_canonical() {
        assert_eq!(day_name(Weekday::Mon), "Monday");
        assert_eq!(day_name(Weekday::Sun), "Sunday");
        for day in crate::schedules::DAY_NAMES {
            assert!(matches!(
                day,
                "Monday" | "Tuesday" | "Wednesday" | "Thursday" | "Friday" | "Saturday" | "Sunday"
            ));
        }
    }
}
