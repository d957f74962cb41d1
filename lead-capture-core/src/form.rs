//! Lead capture form state machine.
//!
//! ```text
//!   Idle ──begin_submit (valid)──▶ Submitting ──complete(Ok)──▶ Submitted
//!    ▲  ╲                              │                           │
//!    │   ╰─begin_submit (invalid)─╮    │ complete(Err)             │ submit_another
//!    │                            ▼    ▼                           │
//!    ╰───────────────────────── Idle (errors / banner) ◀───────────╯
//! ```
//!
//! `LeadForm` is plain state with no I/O; [`FormSession`](crate::session::FormSession)
//! drives it against a sink.

use serde::Serialize;

use crate::error::{FieldErrors, FormError, SinkError};
use crate::fields::LeadField;
use crate::validate::{LeadInput, LeadSubmission};

pub const SUBMIT_LABEL: &str = "Get My Free Consultation";
pub const SUBMITTING_LABEL: &str = "Submitting...";
pub const SUBMIT_ANOTHER_LABEL: &str = "Submit Another Request";
pub const FAILURE_BANNER: &str = "We couldn't submit your request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

/// Render state of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
}

/// Ticket for one in-flight submission.
///
/// Produced by [`LeadForm::begin_submit`] and handed back to
/// [`LeadForm::complete`]. A ticket from an earlier generation is stale.
#[derive(Debug)]
pub struct PendingSubmission {
    generation: u64,
    lead: LeadSubmission,
}

impl PendingSubmission {
    pub fn lead(&self) -> &LeadSubmission {
        &self.lead
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeadForm {
    values: LeadInput,
    errors: FieldErrors,
    banner: Option<String>,
    phase: FormPhase,
    generation: u64,
}

impl LeadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// An idle form pre-filled with `values` (e.g. from a posted request).
    pub fn with_values(values: LeadInput) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &LeadInput {
        &self.values
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: LeadField) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn submit_button(&self) -> SubmitButton {
        match self.phase {
            FormPhase::Submitting => SubmitButton {
                label: SUBMITTING_LABEL,
                disabled: true,
            },
            FormPhase::Idle | FormPhase::Submitted => SubmitButton {
                label: SUBMIT_LABEL,
                disabled: false,
            },
        }
    }

    /// Edit one field. Ignored unless the form is idle.
    ///
    /// Existing errors stay visible until the next submission attempt.
    pub fn set_field(&mut self, field: LeadField, value: impl Into<String>) -> bool {
        if self.phase != FormPhase::Idle {
            return false;
        }
        self.values.set(field, value);
        true
    }

    /// Validate and, when valid, move to `Submitting`.
    ///
    /// Invalid input leaves the form idle with `errors` populated and the
    /// entered values untouched.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, FormError> {
        match self.phase {
            FormPhase::Submitting => return Err(FormError::Busy),
            FormPhase::Submitted => return Err(FormError::AlreadySubmitted),
            FormPhase::Idle => {}
        }

        self.banner = None;
        match self.values.to_submission() {
            Ok(lead) => {
                self.errors.clear();
                self.generation += 1;
                self.phase = FormPhase::Submitting;
                Ok(PendingSubmission {
                    generation: self.generation,
                    lead,
                })
            }
            Err(errors) => {
                tracing::debug!(failed = errors.len(), "lead form failed validation");
                self.errors = errors.clone();
                Err(FormError::Invalid(errors))
            }
        }
    }

    /// Apply the sink outcome for `pending`.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale: the form
    /// was reset, or another submission superseded it.
    pub fn complete(&mut self, pending: PendingSubmission, outcome: Result<(), SinkError>) -> bool {
        if self.phase != FormPhase::Submitting || pending.generation != self.generation {
            tracing::debug!(
                ticket = pending.generation,
                current = self.generation,
                "discarding stale submission result"
            );
            return false;
        }

        match outcome {
            Ok(()) => {
                self.values = LeadInput::default();
                self.errors.clear();
                self.banner = None;
                self.phase = FormPhase::Submitted;
            }
            Err(error) => {
                tracing::warn!(%error, "lead submission failed");
                self.banner = Some(FAILURE_BANNER.to_string());
                self.phase = FormPhase::Idle;
            }
        }
        true
    }

    /// Leave the confirmation view for an empty form.
    pub fn submit_another(&mut self) -> bool {
        if self.phase != FormPhase::Submitted {
            return false;
        }
        self.reset();
        true
    }

    /// Drop everything, including any in-flight submission.
    pub fn reset(&mut self) {
        self.values = LeadInput::default();
        self.errors.clear();
        self.banner = None;
        self.phase = FormPhase::Idle;
        self.generation += 1;
    }
}
