//! Weekly timesheet generation: which meetings count as attended on
//! which work day, and which recurring meetings still need the caller
//! to confirm them.
pub mod board;
pub mod candidates;
pub mod classify;
pub mod pipeline;
pub mod recurrence;
pub mod response;
pub mod strategy;
pub mod week;

pub use board::{AttendanceBoard, WorkDay};
pub use candidates::{CandidateTable, RecurringCandidate, RecurringSelection};
pub use classify::classify_events;
pub use pipeline::{TimesheetRequest, generate_timesheet};
pub use recurrence::describe_recurrence;
pub use response::{PendingCandidate, TimesheetResponse, TimesheetSummary, is_finalize};
pub use strategy::{CoverageStrategy, LegacyStrategy, TimesheetStrategy};
pub use week::{WeekWindow, parse_week_sunday};
