//! Lead capture core.
//!
//! Field catalogue, validation of raw form input into a [`LeadSubmission`],
//! the `Idle → Submitting → Submitted` form state machine, and the
//! [`LeadSink`] boundary that validated leads are handed to.

pub mod error;
pub mod fields;
pub mod form;
pub mod session;
pub mod sink;
pub mod validate;

pub use error::{FieldErrors, FormError, SinkError};
pub use fields::{ArrBand, BudgetBand, ChoiceOption, EmployeeBand, InputKind, LeadField, Timeline};
pub use form::{FormPhase, LeadForm, PendingSubmission, SubmitButton};
pub use session::FormSession;
pub use sink::{LeadSink, MemorySink, SimulatedSink, DEFAULT_SUBMIT_DELAY};
pub use validate::{validate_lead, LeadInput, LeadSubmission};
