use serde::{Deserialize, Serialize};
use time::{macros::format_description, Time};
use uuid::Uuid;

use super::repo::Schedule;

#[derive(Debug, Deserialize)]
pub struct ScheduleEntry {
    pub day_of_week: String,
    /// "HH:MM" or "HH:MM:SS"; seconds are ignored by the matcher.
    pub time_of_day: String,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub day_of_week: String,
    pub time_of_day: String,
}

impl From<Schedule> for ScheduleResponse {
    fn from(s: Schedule) -> Self {
        Self {
            id: s.id,
            day_of_week: s.day_of_week,
            time_of_day: format_time_of_day(s.time_of_day),
        }
    }
}

pub fn parse_time_of_day(raw: &str) -> Option<Time> {
    let hm = format_description!("[hour]:[minute]");
    let hms = format_description!("[hour]:[minute]:[second]");
    Time::parse(raw, &hm)
        .or_else(|_| Time::parse(raw, &hms))
        .ok()
}

pub fn format_time_of_day(t: Time) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hour_minute() {
        let t = parse_time_of_day("09:30").unwrap();
        assert_eq!((t.hour(), t.minute()), (9, 30));
    }

    #[test]
    fn parses_with_seconds() {
        let t = parse_time_of_day("23:05:59").unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 5));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_time_of_day("9am").is_none());
        assert!(parse_time_of_day("25:00").is_none());
        assert!(parse_time_of_day("").is_none());
    }

    #[test]
    fn formats_zero_padded() {
        let t = parse_time_of_day("07:05").unwrap();
        assert_eq!(format_time_of_day(t), "07:05");
    }
}
