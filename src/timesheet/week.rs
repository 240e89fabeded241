use std::fmt;

use chrono::{Days, NaiveDate};

use crate::core::TimesheetError;

/// Monday to Friday of the week following an anchor Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    /// The anchor is trusted to be a Sunday. Any other date still
    /// yields a five day window starting the day after it. `None` when
    /// the window runs past the last representable date.
    pub fn from_sunday(sunday: NaiveDate) -> Option<Self> {
        let start = sunday.checked_add_days(Days::new(1))?;
        let end = start.checked_add_days(Days::new(4))?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the window, first to last.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..5).map(|offset| self.start + Days::new(offset))
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Parse a `YYYY-MM-DD` anchor. Signed or extended years are refused,
/// as is any anchor whose week would fall outside the calendar.
pub fn parse_week_sunday(raw: &str) -> Result<NaiveDate, TimesheetError> {
    let invalid = || TimesheetError::InvalidWeekAnchor(raw.to_string());
    let trimmed = raw.trim();
    if !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let sunday = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())?;
    WeekWindow::from_sunday(sunday).ok_or_else(invalid)?;
    Ok(sunday)
}
