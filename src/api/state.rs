use anyhow::Result;
use reqwest::Client;

use crate::core::AppConfig;

/// Read-only state shared by every request.
pub struct AppState {
    pub config: AppConfig,
    // Client used to download published calendars
    pub http: Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.fetch_timeout).build()?;
        Ok(Self { config, http })
    }
}
