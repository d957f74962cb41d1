//! Shared application state
//!
//! Every request builds its own form; the sink, the compiled templates and
//! the submission token claims are shared.

use std::sync::Arc;

use handlebars::TemplateError;
use lead_capture_core::LeadSink;

use crate::render::ContactPages;
use crate::tokens::SubmissionTokens;

#[derive(Clone)]
pub struct AppState {
    pub sink: Arc<dyn LeadSink>,
    pub pages: Arc<ContactPages>,
    pub tokens: Arc<SubmissionTokens>,
}

impl AppState {
    pub fn new(sink: Arc<dyn LeadSink>) -> Result<Self, TemplateError> {
        Ok(Self {
            sink,
            pages: Arc::new(ContactPages::new()?),
            tokens: Arc::new(SubmissionTokens::default()),
        })
    }
}
