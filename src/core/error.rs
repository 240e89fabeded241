//! Errors surfaced to the caller of a timesheet request.
//!
//! Every variant here is a client error: the request or the calendar it
//! points at was unusable. Events that are merely irrelevant or
//! incomplete are dropped silently during classification and never
//! become an error.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimesheetError {
    #[error("Invalid week_sunday '{0}', expected YYYY-MM-DD")]
    InvalidWeekAnchor(String),

    #[error("Provide ICS file or ICS link")]
    MissingCalendarSource,

    #[error("Only HTTPS ICS links allowed")]
    InsecureLink,

    #[error("Only .ics calendar links are supported")]
    UnsupportedLinkExtension,

    #[error("ICS links from {0} are not supported")]
    HostNotAllowed(String),

    #[error("Failed to download ICS file")]
    DownloadFailed,

    #[error("Invalid ICS content")]
    NotACalendar,

    #[error("Malformed calendar: {0}")]
    MalformedCalendar(String),

    #[error("Invalid form data: {0}")]
    InvalidForm(String),
}
