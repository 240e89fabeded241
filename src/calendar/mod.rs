//! Calendar input: the event records the timesheet works from, the
//! ICS parser that produces them and the loader that retrieves raw
//! calendar bytes from an upload or a remote link. Zone names found in
//! DATE-TIME values are resolved by `zones`.
pub mod loader;
pub mod models;
pub mod parser;
pub mod zones;

pub use loader::{fetch_ics, load_ics_data, validate_ics_url};
pub use models::*;
pub use parser::parse_calendar;
