//! The two ways of turning recurring meetings into timesheet entries.
//!
//! `CoverageStrategy` backs the current endpoint. `LegacyStrategy`
//! reproduces the first version of the endpoint for callers that still
//! depend on it, including its tendency to double count a recurring
//! meeting.
use chrono::NaiveDate;
use chrono_tz::Tz;

use super::board::{AttendanceBoard, WorkDay};
use super::candidates::{CandidateTable, RecurringCandidate};
use super::response::PendingCandidate;
use super::week::WeekWindow;
use crate::calendar::EventStart;

pub trait TimesheetStrategy: Send + Sync {
    /// Key a recurring event is registered under, or `None` when it
    /// can't be tracked as a candidate.
    fn candidate_key(&self, uid: &str, summary: &str) -> Option<String>;

    /// Whether an event with a blank summary still gets recorded.
    fn keeps_blank_summaries(&self) -> bool {
        false
    }

    /// Date a series counts as starting on when deciding whether it is
    /// active during the week.
    fn series_start(&self, start: &EventStart, tz: &Tz) -> NaiveDate {
        start.local_date(tz)
    }

    /// Put an explicitly scheduled meeting on the board.
    fn record(&self, board: &mut AttendanceBoard, day: WorkDay, summary: &str);

    /// Drop candidates that need no confirmation from the caller.
    fn reconcile(&self, board: &AttendanceBoard, candidates: &mut CandidateTable);

    /// Place a confirmed candidate on the days it occurs this week.
    fn apply(&self, candidate: &RecurringCandidate, week: &WeekWindow, board: &mut AttendanceBoard);

    fn pending(&self, candidate: &RecurringCandidate) -> PendingCandidate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageStrategy;

impl TimesheetStrategy for CoverageStrategy {
    fn candidate_key(&self, uid: &str, _summary: &str) -> Option<String> {
        (!uid.is_empty()).then(|| uid.to_string())
    }

    fn record(&self, board: &mut AttendanceBoard, day: WorkDay, summary: &str) {
        board.attend(day, summary);
    }

    /// A candidate is dropped once every day in its BYDAY already lists
    /// a meeting with the same summary. Matching is by summary text so
    /// two series sharing a title can hide each other.
    fn reconcile(&self, board: &AttendanceBoard, candidates: &mut CandidateTable) {
        candidates.retain(|candidate| {
            if candidate.by_day.is_empty() {
                return true;
            }
            let covered = board.covered_codes(&candidate.summary);
            let fully_covered = candidate
                .by_day
                .iter()
                .all(|code| covered.contains(code.as_str()));
            if fully_covered {
                tracing::debug!(
                    "Recurring '{}' already covered by explicit entries",
                    candidate.summary
                );
            }
            !fully_covered
        });
    }

    fn apply(&self, candidate: &RecurringCandidate, week: &WeekWindow, board: &mut AttendanceBoard) {
        for date in week.dates() {
            let Some(day) = WorkDay::from_date(date) else {
                continue;
            };
            if !candidate.occurs_on(day.code()) || candidate.exdates.contains(&date) {
                continue;
            }
            board.attend(day, &candidate.summary);
        }
    }

    fn pending(&self, candidate: &RecurringCandidate) -> PendingCandidate {
        PendingCandidate {
            uid: Some(candidate.uid.clone()),
            summary: candidate.summary.clone(),
            recurrence_text: Some(candidate.recurrence_text.clone()),
            byday: Some(candidate.by_day.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyStrategy;

impl TimesheetStrategy for LegacyStrategy {
    fn candidate_key(&self, _uid: &str, summary: &str) -> Option<String> {
        Some(summary.to_string())
    }

    fn keeps_blank_summaries(&self) -> bool {
        true
    }

    /// The start as written, without converting it to the local zone.
    fn series_start(&self, start: &EventStart, _tz: &Tz) -> NaiveDate {
        start.written_date()
    }

    fn record(&self, board: &mut AttendanceBoard, day: WorkDay, summary: &str) {
        board.append(day, summary);
    }

    /// Any explicit entry with the same summary, on any day, drops the
    /// candidate.
    fn reconcile(&self, board: &AttendanceBoard, candidates: &mut CandidateTable) {
        candidates.retain(|candidate| !board.mentions(&candidate.summary));
    }

    /// Every listed work day gets the meeting, regardless of exception
    /// dates or what is already there.
    fn apply(&self, candidate: &RecurringCandidate, _week: &WeekWindow, board: &mut AttendanceBoard) {
        for day in candidate.by_day.iter().filter_map(|code| WorkDay::from_code(code)) {
            board.append(day, &candidate.summary);
        }
    }

    fn pending(&self, candidate: &RecurringCandidate) -> PendingCandidate {
        PendingCandidate {
            uid: None,
            summary: candidate.summary.clone(),
            recurrence_text: None,
            byday: None,
        }
    }
}
