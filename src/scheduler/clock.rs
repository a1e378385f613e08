use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Resolves a stored IANA zone identifier, falling back to UTC on
/// anything unrecognized. The fallback silently shifts that user's
/// delivery times, hence the warning rather than a silent default.
pub fn resolve_zone(identifier: &str) -> Tz {
    match identifier.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            warn!(timezone = %identifier, "unrecognized timezone, falling back to UTC");
            Tz::UTC
        }
    }
}

pub fn local_time(tz: Tz, now: DateTime<Utc>) -> DateTime<Tz> {
    now.with_timezone(&tz)
}

/// The local calendar date, as a `time::Date` for the deliveries table.
pub fn local_date(local: &DateTime<Tz>) -> anyhow::Result<time::Date> {
    let month = time::Month::try_from(local.month() as u8)?;
    Ok(time::Date::from_calendar_date(
        local.year(),
        month,
        local.day() as u8,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn recognized_zone_converts_exactly() {
        let tz = resolve_zone("Europe/Berlin");
        // 2024-01-15 12:00 UTC is 13:00 in Berlin (CET).
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let local = local_time(tz, now);
        assert_eq!(chrono::Timelike::hour(&local), 13);
    }

    #[test]
    fn unrecognized_zone_falls_back_to_utc() {
        assert_eq!(resolve_zone("Not/AZone"), Tz::UTC);
        assert_eq!(resolve_zone(""), Tz::UTC);
        assert_eq!(resolve_zone("utc sort of"), Tz::UTC);
    }

    #[test]
    fn local_date_crosses_midnight_with_the_zone() {
        // 23:30 UTC on the 15th is already the 16th in Tokyo.
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap();
        let local = local_time(resolve_zone("Asia/Tokyo"), now);
        let date = local_date(&local).unwrap();
        assert_eq!(date.day(), 16);
    }
}
