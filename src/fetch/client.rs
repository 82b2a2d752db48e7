use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use super::{parse_meta, Source};
use crate::config::Config;
use crate::error::TrackerError;
use crate::ranges::RangeSet;

pub struct MetaClient {
    client: Client,
    endpoint: String,
}

impl MetaClient {
    pub fn new(config: &Config) -> Result<MetaClient, TrackerError> {
        Self::with_timeout(&config.endpoint, &config.user_agent, config.timeout)
    }

    pub fn with_timeout(
        endpoint: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<MetaClient, TrackerError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| TrackerError::Network(format!("Unable to build HTTP client: {}", e)))?;

        Ok(MetaClient {
            client,
            endpoint: endpoint.to_owned(),
        })
    }
}

impl Source for MetaClient {
    fn fetch(&self) -> Result<RangeSet, TrackerError> {
        debug!("GET {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(|e| TrackerError::Network(format!("Unable to reach GitHub API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Network(format!(
                "GitHub API request failed: HTTP {}",
                status
            )));
        }

        let body = response
            .text()
            .map_err(|e| TrackerError::Network(format!("Unable to reach GitHub API: {}", e)))?;

        let ranges = parse_meta(&body)?;
        info!(
            "fetched {} ranges in {} categories",
            ranges.entry_count(),
            ranges.keys().count()
        );
        Ok(ranges)
    }
}
