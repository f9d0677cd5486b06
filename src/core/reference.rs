use std::str::FromStr;

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The moment the merged series are aligned to.
///
/// Each area gets the calendar day containing this moment in the area's own time zone.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::From)]
pub enum Reference {
    Instant(DateTime<Utc>),

    /// Same calendar date in every time zone.
    Date(NaiveDate),
}

impl Reference {
    /// Tomorrow according to the local clock.
    #[must_use]
    pub fn tomorrow() -> Self {
        let today = Local::now().date_naive();
        Self::Date(today.checked_add_days(Days::new(1)).unwrap_or(today))
    }

    #[must_use]
    pub fn local_date(self, time_zone: Tz) -> NaiveDate {
        match self {
            Self::Instant(instant) => instant.with_timezone(&time_zone).date_naive(),
            Self::Date(date) => date,
        }
    }

    /// First and last microsecond of the local day, as local times.
    ///
    /// Midnight may fall into a DST gap in some zones, then the day starts with the first
    /// existing instant after it.
    #[must_use]
    pub fn local_bounds(self, time_zone: Tz) -> (DateTime<Tz>, DateTime<Tz>) {
        let date = self.local_date(time_zone);
        let start = resolve_forward(time_zone, date.and_time(NaiveTime::MIN));
        let end = resolve_forward(
            time_zone,
            date.and_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(date.and_time(NaiveTime::MIN)),
        );
        (start, end)
    }
}

fn resolve_forward(time_zone: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    let mut local = local;
    loop {
        if let Some(resolved) = time_zone.from_local_datetime(&local).earliest() {
            break resolved;
        }
        local += chrono::TimeDelta::minutes(1);
    }
}

#[derive(Debug, thiserror::Error)]
#[error("`{0}` is neither a date nor a date and time")]
pub struct ParseReferenceError(String);

impl FromStr for Reference {
    type Err = ParseReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Instant(instant.to_utc()));
        }
        if let Ok(naive) = s.parse::<NaiveDateTime>() {
            return Ok(Self::Instant(naive.and_utc()));
        }
        ["%Y-%m-%d", "%d-%m-%Y"]
            .into_iter()
            .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
            .map(Self::Date)
            .ok_or_else(|| ParseReferenceError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;
    use chrono_tz::{America, Europe};

    use super::*;

    #[test]
    fn test_parse_rfc3339_ok() {
        let reference: Reference = "2021-03-15T12:00:00+01:00".parse().unwrap();
        assert_eq!(reference, Reference::Instant(Utc.with_ymd_and_hms(2021, 3, 15, 11, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_naive_is_utc() {
        let reference: Reference = "2021-03-15T12:00:00".parse().unwrap();
        assert_eq!(reference, Reference::Instant(Utc.with_ymd_and_hms(2021, 3, 15, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_dates_ok() {
        let expected = Reference::Date(NaiveDate::from_ymd_opt(2021, 3, 15).unwrap());
        assert_eq!("2021-03-15".parse::<Reference>().unwrap(), expected);
        assert_eq!("15-03-2021".parse::<Reference>().unwrap(), expected);
    }

    #[test]
    fn test_parse_junk() {
        assert!("tomorrow".parse::<Reference>().is_err());
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let reference = Reference::Instant(Utc.with_ymd_and_hms(2021, 3, 15, 23, 30, 0).unwrap());
        assert_eq!(reference.local_date(Europe::Helsinki), NaiveDate::from_ymd_opt(2021, 3, 16).unwrap());
        assert_eq!(reference.local_date(Europe::Stockholm), NaiveDate::from_ymd_opt(2021, 3, 16).unwrap());
        assert_eq!(reference.local_date(America::New_York), NaiveDate::from_ymd_opt(2021, 3, 15).unwrap());
    }

    #[test]
    fn test_local_bounds_ok() {
        let reference = Reference::Instant(Utc.with_ymd_and_hms(2021, 3, 15, 12, 0, 0).unwrap());
        let (start, end) = reference.local_bounds(Europe::Stockholm);
        assert_eq!(start.to_utc(), Utc.with_ymd_and_hms(2021, 3, 14, 23, 0, 0).unwrap());
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(end.nanosecond(), 999_999_000);
    }
}
