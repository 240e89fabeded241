//! Router for the timesheet API

use std::sync::Arc;

use axum::{Router, extract::Multipart, extract::State, response::Json};

use super::public::TimesheetForm;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::calendar::{load_ics_data, parse_calendar};
use crate::core::TimesheetError;
use crate::timesheet::{
    CoverageStrategy, LegacyStrategy, RecurringSelection, TimesheetRequest, TimesheetResponse,
    generate_timesheet, is_finalize, parse_week_sunday,
};

type SharedState = Arc<AppState>;

/// Timesheet from an uploaded calendar or a published calendar link.
/// Recurring meetings are tracked by UID.
async fn timesheet_v2_handler(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<TimesheetResponse>, ApiError> {
    let form = TimesheetForm::from_multipart(multipart).await?;
    let week_sunday = parse_week_sunday(form.week_sunday()?)?;

    let raw = load_ics_data(
        &state.http,
        &state.config,
        form.file,
        form.ics_url.as_deref(),
    )
    .await?;
    let events = parse_calendar(&raw)?;

    let request = TimesheetRequest {
        week_sunday,
        selection: RecurringSelection::parse(&form.include_recurring_uids),
        finalize: is_finalize(&form.finalize),
    };
    let resp = generate_timesheet(
        &events,
        &request,
        &state.config.local_tz,
        &CoverageStrategy,
    )?;

    Ok(Json(resp))
}

/// Timesheet from an uploaded calendar with recurring meetings tracked
/// by summary. Kept for older clients.
async fn timesheet_legacy_handler(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<TimesheetResponse>, ApiError> {
    let form = TimesheetForm::from_multipart(multipart).await?;
    let week_sunday = parse_week_sunday(form.week_sunday()?)?;

    let Some(raw) = form.file else {
        return Err(TimesheetError::MissingCalendarSource.into());
    };
    let events = parse_calendar(&raw)?;

    let request = TimesheetRequest {
        week_sunday,
        selection: RecurringSelection::parse(&form.include_recurring),
        finalize: is_finalize(&form.finalize),
    };
    let resp = generate_timesheet(&events, &request, &state.config.local_tz, &LegacyStrategy)?;

    Ok(Json(resp))
}

/// Create the timesheet router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/generate-timesheet-v2",
            axum::routing::post(timesheet_v2_handler),
        )
        .route(
            "/generate-timesheet",
            axum::routing::post(timesheet_legacy_handler),
        )
}
