use chrono::NaiveDate;
use chrono_tz::Tz;

use super::candidates::RecurringSelection;
use super::classify::classify_events;
use super::response::{TimesheetResponse, assemble_response};
use super::strategy::TimesheetStrategy;
use super::week::WeekWindow;
use crate::calendar::CalendarEvent;
use crate::core::TimesheetError;

/// Everything a caller decides about one timesheet.
#[derive(Debug, Clone)]
pub struct TimesheetRequest {
    pub week_sunday: NaiveDate,
    pub selection: RecurringSelection,
    pub finalize: bool,
}

/// Turn a calendar into the timesheet for one week. All state is built
/// fresh for the call.
pub fn generate_timesheet(
    events: &[CalendarEvent],
    request: &TimesheetRequest,
    tz: &Tz,
    strategy: &dyn TimesheetStrategy,
) -> Result<TimesheetResponse, TimesheetError> {
    let week = WeekWindow::from_sunday(request.week_sunday)
        .ok_or_else(|| TimesheetError::InvalidWeekAnchor(request.week_sunday.to_string()))?;
    let (mut board, mut candidates) = classify_events(events, &week, tz, strategy);

    strategy.reconcile(&board, &mut candidates);

    for candidate in candidates.resolve(&request.selection) {
        strategy.apply(candidate, &week, &mut board);
    }

    // Applied candidates stay in the pending list
    let pending: Option<Vec<_>> = (!request.finalize)
        .then(|| candidates.iter().map(|c| strategy.pending(c)).collect());

    tracing::debug!(
        "Generated timesheet for {} with {} pending recurring meetings",
        week,
        candidates.len()
    );
    Ok(assemble_response(&week, &board, pending))
}
