//! Async driver for one mounted lead form.
//!
//! The sink call runs on its own task that only holds a weak handle to the
//! form. If the session is dropped mid-submission the lead still reaches the
//! sink, but the result is discarded instead of touching freed state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::task::JoinHandle;

use crate::error::FormError;
use crate::fields::LeadField;
use crate::form::{FormPhase, LeadForm};
use crate::sink::LeadSink;
use crate::validate::LeadInput;

pub struct FormSession {
    form: Arc<Mutex<LeadForm>>,
    sink: Arc<dyn LeadSink>,
}

impl FormSession {
    pub fn new(sink: Arc<dyn LeadSink>) -> Self {
        Self::with_values(sink, LeadInput::default())
    }

    pub fn with_values(sink: Arc<dyn LeadSink>, values: LeadInput) -> Self {
        Self {
            form: Arc::new(Mutex::new(LeadForm::with_values(values))),
            sink,
        }
    }

    /// Copy of the current form state, for rendering.
    pub fn snapshot(&self) -> LeadForm {
        lock(&self.form).clone()
    }

    pub fn phase(&self) -> FormPhase {
        lock(&self.form).phase()
    }

    pub fn set_field(&self, field: LeadField, value: impl Into<String>) -> bool {
        lock(&self.form).set_field(field, value)
    }

    pub fn submit_another(&self) -> bool {
        lock(&self.form).submit_another()
    }

    /// Validate synchronously and start the sink call in the background.
    ///
    /// Validation failures and refusals (busy, already submitted) come back
    /// immediately and nothing is spawned. Must be called inside a tokio runtime.
    pub fn spawn_submit(&self) -> Result<JoinHandle<()>, FormError> {
        let pending = lock(&self.form).begin_submit()?;
        let form: Weak<Mutex<LeadForm>> = Arc::downgrade(&self.form);
        let sink = Arc::clone(&self.sink);

        Ok(tokio::spawn(async move {
            let outcome = sink.send_lead(pending.lead()).await;
            match form.upgrade() {
                Some(form) => {
                    lock(&form).complete(pending, outcome);
                }
                None => {
                    tracing::debug!(
                        generation = pending.generation(),
                        ok = outcome.is_ok(),
                        "form session closed before submission finished; result dropped"
                    );
                }
            }
        }))
    }

    /// Submit and wait for the outcome. Returns the phase the form settled in.
    ///
    /// Dropping the returned future does not abandon the submission; the
    /// spawned task still completes and updates the form.
    pub async fn submit(&self) -> Result<FormPhase, FormError> {
        let task = self.spawn_submit()?;
        if let Err(error) = task.await {
            tracing::error!(%error, "submission task failed");
        }
        Ok(self.phase())
    }
}

fn lock(form: &Mutex<LeadForm>) -> MutexGuard<'_, LeadForm> {
    form.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::form::SUBMITTING_LABEL;
    use crate::sink::{MemorySink, SimulatedSink};
    use crate::validate::tests::valid_input;
    use crate::validate::LeadSubmission;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Holds every lead until released.
    struct GatedSink {
        gate: Notify,
        inner: MemorySink,
    }

    #[async_trait]
    impl LeadSink for GatedSink {
        async fn send_lead(&self, lead: &LeadSubmission) -> Result<(), SinkError> {
            self.gate.notified().await;
            self.inner.send_lead(lead).await
        }
    }

    fn gated() -> Arc<GatedSink> {
        Arc::new(GatedSink {
            gate: Notify::new(),
            inner: MemorySink::new(),
        })
    }

    #[tokio::test]
    async fn idle_submitting_submitted() {
        let sink = gated();
        let session = FormSession::with_values(sink.clone(), valid_input());
        assert_eq!(session.phase(), FormPhase::Idle);

        let task = session.spawn_submit().unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase(), FormPhase::Submitting);
        assert_eq!(snapshot.submit_button().label, SUBMITTING_LABEL);
        assert!(snapshot.submit_button().disabled);
        assert_eq!(session.spawn_submit().unwrap_err(), FormError::Busy);

        sink.gate.notify_one();
        task.await.unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase(), FormPhase::Submitted);
        assert!(snapshot.values().is_blank());
        assert_eq!(sink.inner.leads().len(), 1);

        assert!(session.submit_another());
        assert_eq!(session.phase(), FormPhase::Idle);
        assert!(session.snapshot().errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_waits_out_simulated_delay() {
        let sink = Arc::new(SimulatedSink::new(Duration::from_secs(1)));
        let session = FormSession::with_values(sink, valid_input());

        let started = tokio::time::Instant::now();
        assert_eq!(session.submit().await, Ok(FormPhase::Submitted));
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn invalid_submit_spawns_nothing() {
        let sink = Arc::new(MemorySink::new());
        let session = FormSession::new(sink.clone());
        session.set_field(LeadField::Name, "A");

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, FormError::Invalid(_)));
        assert_eq!(session.snapshot().values().name, "A");
        assert!(sink.leads().is_empty());
    }

    #[tokio::test]
    async fn failing_sink_leaves_form_editable() {
        let sink = Arc::new(MemorySink::failing(SinkError::Transport("refused".into())));
        let session = FormSession::with_values(sink, valid_input());

        assert_eq!(session.submit().await, Ok(FormPhase::Idle));
        let snapshot = session.snapshot();
        assert!(snapshot.banner().is_some());
        assert_eq!(snapshot.values(), &valid_input());
        assert!(session.set_field(LeadField::Role, "CEO"));
    }

    #[tokio::test]
    async fn dropped_session_still_delivers_lead() {
        let sink = gated();
        let session = FormSession::with_values(sink.clone(), valid_input());

        let task = session.spawn_submit().unwrap();
        drop(session);
        sink.gate.notify_one();

        task.await.unwrap();
        assert_eq!(sink.inner.leads().len(), 1);
    }
}
