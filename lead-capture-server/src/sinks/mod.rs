//! Sink selection for the server.

mod webhook;

use std::sync::Arc;

use lead_capture_core::{LeadSink, SimulatedSink};

use crate::config::ServerConfig;

pub use webhook::WebhookSink;

/// Webhook sink when a URL is configured, otherwise the simulated sink.
pub fn build_sink(config: &ServerConfig) -> Result<Arc<dyn LeadSink>, reqwest::Error> {
    match &config.webhook {
        Some(webhook) => {
            tracing::info!(url = %webhook.url, timeout = ?webhook.timeout, "forwarding leads to webhook");
            Ok(Arc::new(WebhookSink::new(webhook.url.clone(), webhook.timeout)?))
        }
        None => {
            tracing::info!(delay = ?config.submit_delay, "using simulated lead sink");
            Ok(Arc::new(SimulatedSink::new(config.submit_delay)))
        }
    }
}
