//! Twilio Messages adapter

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use super::{check_status, MessageSender, SendReceipt};

#[derive(Clone)]
pub struct TwilioClient {
    http: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

impl TwilioClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        account_sid: String,
        auth_token: String,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_sid,
            auth_token,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/Accounts/{}/Messages.json", self.base_url, self.account_sid)
    }
}

/// A created message resource counts as sent unless Twilio already marked it failed
fn receipt_from(resource: MessageResource) -> Result<SendReceipt> {
    match resource.status.as_deref() {
        Some("failed") | Some("undelivered") => Err(anyhow::anyhow!(
            "Twilio rejected message {}: {}",
            resource.sid,
            resource.error_message.unwrap_or_else(|| "no error message".to_string())
        )),
        _ => Ok(SendReceipt {
            provider_id: resource.sid,
        }),
    }
}

#[async_trait]
impl MessageSender for TwilioClient {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<SendReceipt> {
        let url = self.messages_url();
        debug!("Twilio POST {url} to {to}");
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("From", from), ("To", to), ("Body", body)])
            .send()
            .await?;
        let response = check_status("Twilio", response).await?;
        receipt_from(response.json::<MessageResource>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_messages_url() {
        let client = TwilioClient::new(
            reqwest::Client::new(),
            "https://api.twilio.com/2010-04-01/",
            "AC123".to_string(),
            "token".to_string(),
        );
        assert_eq!(
            client.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn test_queued_message_is_receipt() {
        let resource: MessageResource = serde_json::from_value(json!({
            "sid": "SM1",
            "status": "queued",
            "to": "+447773333888"
        }))
        .unwrap();
        assert_eq!(receipt_from(resource).unwrap().provider_id, "SM1");
    }

    #[test]
    fn test_failed_message_is_error() {
        let resource: MessageResource = serde_json::from_value(json!({
            "sid": "SM2",
            "status": "failed",
            "error_message": "Unreachable destination"
        }))
        .unwrap();
        let err = receipt_from(resource).unwrap_err();
        assert!(err.to_string().contains("Unreachable destination"));
    }
}
