//! Error types for lead validation, submission and the form state machine.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::fields::LeadField;

/// Field name → human-readable validation message.
///
/// Ordered by field display order so renderers and JSON output are stable.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FieldErrors(BTreeMap<LeadField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. The first message recorded for a field wins.
    pub fn insert(&mut self, field: LeadField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: LeadField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: LeadField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = LeadField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Failure reported by a [`LeadSink`](crate::sink::LeadSink).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("lead rejected by backend with status {status}")]
    Rejected { status: u16 },

    #[error("lead submission timed out")]
    Timeout,

    #[error("lead transport failed: {0}")]
    Transport(String),
}

/// Why a submission attempt was not started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("a submission is already in progress")]
    Busy,

    #[error("form already submitted; start another request first")]
    AlreadySubmitted,

    #[error("validation failed: {0}")]
    Invalid(FieldErrors),
}
