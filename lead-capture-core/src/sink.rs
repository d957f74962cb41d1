//! Submission boundary.
//!
//! The form hands every validated lead to a [`LeadSink`]. The form never knows
//! the transport; callers inject the sink (simulated, in-memory, webhook...).

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use uuid::Uuid;

use crate::error::SinkError;
use crate::validate::LeadSubmission;

/// Delay used by the simulated sink unless configured otherwise.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1000);

/// Destination for validated leads.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn send_lead(&self, lead: &LeadSubmission) -> Result<(), SinkError>;
}

/// Waits a fixed delay, then logs the lead. Never fails.
#[derive(Debug, Clone)]
pub struct SimulatedSink {
    delay: Duration,
}

impl SimulatedSink {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedSink {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

#[async_trait]
impl LeadSink for SimulatedSink {
    async fn send_lead(&self, lead: &LeadSubmission) -> Result<(), SinkError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(
            submission_id = %Uuid::new_v4(),
            company = %lead.company,
            employees = %lead.employees,
            arr = %lead.arr,
            timeline = %lead.timeline,
            budget = %lead.budget,
            "lead received"
        );
        tracing::debug!(?lead, "lead payload");
        Ok(())
    }
}

/// Keeps leads in memory. Useful for previews and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    leads: Mutex<Vec<LeadSubmission>>,
    failure: Option<SinkError>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that records every lead and then reports `error`.
    pub fn failing(error: SinkError) -> Self {
        Self {
            leads: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    pub fn leads(&self) -> Vec<LeadSubmission> {
        self.leads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl LeadSink for MemorySink {
    async fn send_lead(&self, lead: &LeadSubmission) -> Result<(), SinkError> {
        self.leads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(lead.clone());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
