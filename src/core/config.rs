use std::env;
use std::time::Duration;

use chrono_tz::Tz;

const DEFAULT_LOCAL_TZ: Tz = chrono_tz::Asia::Kolkata;
const DEFAULT_ALLOWED_ICS_HOSTS: &str = "outlook.office365.com,outlook.live.com,office365.com";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Zone that meeting start times are bucketed in
    pub local_tz: Tz,
    /// Hosts a remote calendar link may point at. Subdomains are
    /// accepted too.
    pub allowed_ics_hosts: Vec<String>,
    pub fetch_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let local_tz = match env::var("TIMESHEET_LOCAL_TZ") {
            Ok(name) => parse_tz(&name).unwrap_or_else(|| {
                tracing::warn!(
                    "Unknown TIMESHEET_LOCAL_TZ {}, falling back to {}",
                    name,
                    DEFAULT_LOCAL_TZ
                );
                DEFAULT_LOCAL_TZ
            }),
            Err(_) => DEFAULT_LOCAL_TZ,
        };
        let allowed_ics_hosts = parse_hosts(
            &env::var("TIMESHEET_ALLOWED_ICS_HOSTS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ICS_HOSTS.to_string()),
        );
        let fetch_timeout = Duration::from_secs(
            env::var("TIMESHEET_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
        );
        let max_upload_bytes = env::var("TIMESHEET_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            local_tz,
            allowed_ics_hosts,
            fetch_timeout,
            max_upload_bytes,
        }
    }
}

fn parse_tz(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

fn parse_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
        .collect()
}
