//! Opsgenie Alert API adapter

use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use super::{check_status, AlertPayload, AlertSink};

#[derive(Clone)]
pub struct OpsgenieClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpsgenieClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl AlertSink for OpsgenieClient {
    async fn raise_alert(&self, alert: &AlertPayload) -> Result<()> {
        let url = format!("{}/v2/alerts", self.base_url);
        debug!("Opsgenie POST {url} alias {}", alert.alias);
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("GenieKey {}", self.api_key))
            .json(alert)
            .send()
            .await?;
        // Opsgenie answers 202 and processes the request asynchronously
        check_status("Opsgenie", response).await?;
        Ok(())
    }
}
