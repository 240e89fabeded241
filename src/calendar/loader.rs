//! Retrieval of raw calendar bytes from an upload or a published link.
use reqwest::{Client, StatusCode, Url, header};

use crate::core::{AppConfig, TimesheetError};

const CALENDAR_SIGNATURE: &str = "BEGIN:VCALENDAR";

/// Check that a remote calendar link is one we are willing to fetch:
/// https only, an `.ics` path and a host on the allow-list (or a
/// subdomain of one).
pub fn validate_ics_url(ics_url: &str, allowed_hosts: &[String]) -> Result<Url, TimesheetError> {
    let url = Url::parse(ics_url.trim())
        .map_err(|e| TimesheetError::InvalidForm(format!("ics_url is not a valid URL: {e}")))?;

    if url.scheme() != "https" {
        return Err(TimesheetError::InsecureLink);
    }

    if !url.path().ends_with(".ics") {
        return Err(TimesheetError::UnsupportedLinkExtension);
    }

    let host = url.host_str().unwrap_or_default().to_lowercase();
    let allowed = allowed_hosts
        .iter()
        .any(|allowed| host == *allowed || host.ends_with(&format!(".{allowed}")));
    if !allowed {
        return Err(TimesheetError::HostNotAllowed(host));
    }

    Ok(url)
}

/// Download a calendar and make sure it looks like one.
pub async fn fetch_ics(client: &Client, url: Url) -> Result<Vec<u8>, TimesheetError> {
    let resp = client
        .get(url.clone())
        .header(header::USER_AGENT, "Mozilla/5.0")
        .header(header::ACCEPT, "text/calendar,*/*")
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("Fetching {} failed: {}", url, e);
            TimesheetError::DownloadFailed
        })?;

    let status = resp.status();
    if status != StatusCode::OK {
        tracing::warn!("Fetching {} returned {}", url, status);
        return Err(TimesheetError::DownloadFailed);
    }

    let content = resp.bytes().await.map_err(|e| {
        tracing::warn!("Reading body of {} failed: {}", url, e);
        TimesheetError::DownloadFailed
    })?;

    if !looks_like_calendar(&content) {
        return Err(TimesheetError::NotACalendar);
    }

    Ok(content.to_vec())
}

/// Resolve the calendar for a request. A link takes precedence over an
/// uploaded file when both are given.
pub async fn load_ics_data(
    client: &Client,
    config: &AppConfig,
    file: Option<Vec<u8>>,
    ics_url: Option<&str>,
) -> Result<Vec<u8>, TimesheetError> {
    match (file, ics_url) {
        (_, Some(ics_url)) => {
            let url = validate_ics_url(ics_url, &config.allowed_ics_hosts)?;
            tracing::debug!("Fetching calendar from {}", url);
            fetch_ics(client, url).await
        }
        (Some(file), None) => Ok(file),
        (None, None) => Err(TimesheetError::MissingCalendarSource),
    }
}

fn looks_like_calendar(content: &[u8]) -> bool {
    String::from_utf8_lossy(content)
        .to_uppercase()
        .contains(CALENDAR_SIGNATURE)
}
