use itertools::Itertools;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::board::{AttendanceBoard, WorkDay};
use super::week::WeekWindow;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TimesheetResponse {
    pub week_range: String,
    pub timesheet_summary: TimesheetSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_candidates: Option<Vec<PendingCandidate>>,
}

/// A recurring meeting still waiting for confirmation. The legacy
/// listing only carries the summary.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PendingCandidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byday: Option<Vec<String>>,
}

/// One line of text per work day, serialized as a map in Monday to
/// Friday order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesheetSummary(Vec<(WorkDay, String)>);

impl TimesheetSummary {
    pub fn from_board(board: &AttendanceBoard) -> Self {
        Self(
            board
                .iter()
                .map(|(day, meetings)| (day, render_day(meetings)))
                .collect(),
        )
    }

    pub fn get(&self, day: WorkDay) -> &str {
        self.0
            .iter()
            .find(|(d, _)| *d == day)
            .map(|(_, line)| line.as_str())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WorkDay, &str)> {
        self.0.iter().map(|(day, line)| (*day, line.as_str()))
    }
}

impl Serialize for TimesheetSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (day, line) in &self.0 {
            map.serialize_entry(day.name(), line)?;
        }
        map.end()
    }
}

fn render_day(meetings: &[String]) -> String {
    if meetings.is_empty() {
        String::new()
    } else {
        format!("Attended {}", meetings.iter().join(", "))
    }
}

/// Build the response. Pending candidates are listed unless the caller
/// is finalizing.
pub fn assemble_response(
    week: &WeekWindow,
    board: &AttendanceBoard,
    pending: Option<Vec<PendingCandidate>>,
) -> TimesheetResponse {
    TimesheetResponse {
        week_range: week.to_string(),
        timesheet_summary: TimesheetSummary::from_board(board),
        recurring_candidates: pending,
    }
}

/// Only the literal text "true", in any case, finalizes.
pub fn is_finalize(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}
