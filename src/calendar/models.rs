use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

/// A VEVENT as far as the timesheet cares about it. Calendar software
/// is inconsistent about which properties it writes so every field is
/// optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarEvent {
    pub summary: Option<String>,
    pub uid: Option<String>,
    pub start: Option<EventStart>,
    pub rrule: Option<RecurrenceRule>,
    /// EXDATE values reduced to their calendar date
    pub exdates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStart {
    /// All-day value (`VALUE=DATE`)
    Date(NaiveDate),
    /// Wall-clock time without a zone
    Floating(NaiveDateTime),
    /// An absolute instant in the offset it was written in, either `Z`
    /// suffixed or anchored by a resolvable TZID
    Zoned(DateTime<FixedOffset>),
}

impl EventStart {
    /// Date the event falls on in `tz`. Floating times are taken to
    /// already be in `tz` and all-day values start at local midnight.
    pub fn local_date(&self, tz: &Tz) -> NaiveDate {
        match self {
            EventStart::Date(date) => *date,
            EventStart::Floating(naive) => naive.date(),
            EventStart::Zoned(instant) => instant.with_timezone(tz).date_naive(),
        }
    }

    /// Date as written in the calendar, before any zone conversion.
    pub fn written_date(&self) -> NaiveDate {
        match self {
            EventStart::Date(date) => *date,
            EventStart::Floating(naive) => naive.date(),
            EventStart::Zoned(instant) => instant.date_naive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Other(String),
}

impl From<&str> for Frequency {
    fn from(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "SECONDLY" => Frequency::Secondly,
            "MINUTELY" => Frequency::Minutely,
            "HOURLY" => Frequency::Hourly,
            "DAILY" => Frequency::Daily,
            "WEEKLY" => Frequency::Weekly,
            "MONTHLY" => Frequency::Monthly,
            "YEARLY" => Frequency::Yearly,
            other => Frequency::Other(other.to_string()),
        }
    }
}

/// The subset of an RRULE the timesheet honours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub freq: Option<Frequency>,
    /// BYDAY entries as written, e.g. `MO` or `1MO`
    pub by_day: Vec<String>,
    pub until: Option<NaiveDate>,
}
