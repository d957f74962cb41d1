//! Outbound webhook: POSTs each lead as JSON. No retry.

use std::time::Duration;

use async_trait::async_trait;
use lead_capture_core::{LeadSink, LeadSubmission, SinkError};
use reqwest::{Client, Url};

pub struct WebhookSink {
    client: Client,
    url: Url,
}

impl WebhookSink {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl LeadSink for WebhookSink {
    async fn send_lead(&self, lead: &LeadSubmission) -> Result<(), SinkError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(lead)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SinkError::Timeout
                } else {
                    SinkError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(%status, company = %lead.company, "lead forwarded");
            Ok(())
        } else {
            tracing::warn!(%status, url = %self.url, "webhook rejected lead");
            Err(SinkError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
