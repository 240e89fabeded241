use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};

/// The days a timesheet covers, in timesheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl WorkDay {
    pub const ALL: [WorkDay; 5] = [
        WorkDay::Monday,
        WorkDay::Tuesday,
        WorkDay::Wednesday,
        WorkDay::Thursday,
        WorkDay::Friday,
    ];

    /// Weekend dates have no work day.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        match date.weekday() {
            chrono::Weekday::Mon => Some(WorkDay::Monday),
            chrono::Weekday::Tue => Some(WorkDay::Tuesday),
            chrono::Weekday::Wed => Some(WorkDay::Wednesday),
            chrono::Weekday::Thu => Some(WorkDay::Thursday),
            chrono::Weekday::Fri => Some(WorkDay::Friday),
            chrono::Weekday::Sat | chrono::Weekday::Sun => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        WorkDay::ALL.into_iter().find(|day| day.code() == code)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorkDay::Monday => "Monday",
            WorkDay::Tuesday => "Tuesday",
            WorkDay::Wednesday => "Wednesday",
            WorkDay::Thursday => "Thursday",
            WorkDay::Friday => "Friday",
        }
    }

    /// Two letter RRULE code, i.e. the first two letters of the name
    /// upper cased.
    pub fn code(&self) -> &'static str {
        match self {
            WorkDay::Monday => "MO",
            WorkDay::Tuesday => "TU",
            WorkDay::Wednesday => "WE",
            WorkDay::Thursday => "TH",
            WorkDay::Friday => "FR",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for WorkDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Meetings attended on each work day, in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceBoard {
    days: [Vec<String>; 5],
}

impl AttendanceBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a meeting unless it is already listed that day. Returns
    /// whether it was added.
    pub fn attend(&mut self, day: WorkDay, summary: &str) -> bool {
        if self.contains(day, summary) {
            return false;
        }
        self.append(day, summary);
        true
    }

    /// Record a meeting even if it is already listed that day.
    pub fn append(&mut self, day: WorkDay, summary: &str) {
        self.days[day.index()].push(summary.to_string());
    }

    pub fn contains(&self, day: WorkDay, summary: &str) -> bool {
        self.days[day.index()].iter().any(|s| s == summary)
    }

    pub fn meetings(&self, day: WorkDay) -> &[String] {
        &self.days[day.index()]
    }

    /// Whether the meeting is listed on any day.
    pub fn mentions(&self, summary: &str) -> bool {
        WorkDay::ALL.iter().any(|day| self.contains(*day, summary))
    }

    /// Codes of the days the meeting is listed on.
    pub fn covered_codes(&self, summary: &str) -> HashSet<&'static str> {
        WorkDay::ALL
            .iter()
            .filter(|day| self.contains(**day, summary))
            .map(|day| day.code())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WorkDay, &[String])> + '_ {
        WorkDay::ALL
            .into_iter()
            .map(|day| (day, self.meetings(day)))
    }
}
