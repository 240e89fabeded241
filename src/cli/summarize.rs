use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::api::AppState;
use crate::calendar::{load_ics_data, parse_calendar};
use crate::core::AppConfig;
use crate::timesheet::{
    CoverageStrategy, LegacyStrategy, RecurringSelection, TimesheetRequest, TimesheetStrategy,
    generate_timesheet, parse_week_sunday,
};

pub struct SummarizeOptions {
    pub week_sunday: String,
    pub file: Option<PathBuf>,
    pub url: Option<String>,
    pub include: String,
    pub finalize: bool,
    pub legacy: bool,
}

/// Run the timesheet pipeline outside the server and return the
/// response as pretty printed JSON.
pub async fn run(opts: SummarizeOptions) -> Result<String> {
    run_with_config(opts, AppConfig::default()).await
}

pub async fn run_with_config(opts: SummarizeOptions, config: AppConfig) -> Result<String> {
    let week_sunday = parse_week_sunday(&opts.week_sunday)?;

    let file = match &opts.file {
        Some(path) => Some(
            tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let state = AppState::new(config)?;
    let raw = load_ics_data(&state.http, &state.config, file, opts.url.as_deref()).await?;
    let events = parse_calendar(&raw)?;

    let request = TimesheetRequest {
        week_sunday,
        selection: RecurringSelection::parse(&opts.include),
        finalize: opts.finalize,
    };
    let strategy: &dyn TimesheetStrategy = if opts.legacy {
        &LegacyStrategy
    } else {
        &CoverageStrategy
    };
    let resp = generate_timesheet(&events, &request, &state.config.local_tz, strategy)?;

    Ok(serde_json::to_string_pretty(&resp)?)
}
