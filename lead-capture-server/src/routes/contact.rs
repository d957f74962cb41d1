//! HTML contact section.
//!
//!   GET  /        : empty form with a fresh submission token
//!   POST /contact : claim the token, validate, submit, re-render

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html, Form};
use lead_capture_core::{FormError, FormPhase, FormSession, LeadForm, LeadInput};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::tokens::ClaimState;

/// The posted form: the lead fields plus the hidden submission token.
#[derive(Debug, Deserialize)]
pub struct ContactPost {
    #[serde(default)]
    submission_token: Option<String>,
    #[serde(flatten)]
    lead: LeadInput,
}

pub async fn show_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let token = state.tokens.issue();
    Ok(Html(state.pages.render(&LeadForm::new(), token)?))
}

/// Invalid input comes back as 422 with inline errors; a sink failure as 502
/// with the banner. Entered values are preserved in both cases.
///
/// A post whose token is already claimed never reaches the sink: it gets 409
/// with the submitting view while the first post is in flight, or the
/// confirmation once that post has been delivered. A post without a usable
/// token gets 400 and the form back with a fresh token.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(post): Form<ContactPost>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let ContactPost {
        submission_token,
        lead,
    } = post;

    let Some(token) = submission_token.as_deref().and_then(|raw| Uuid::parse_str(raw).ok())
    else {
        tracing::debug!("contact form posted without a submission token");
        let page = state
            .pages
            .render(&LeadForm::with_values(lead), state.tokens.issue())?;
        return Ok((StatusCode::BAD_REQUEST, Html(page)));
    };

    let claim = match state.tokens.claim(token) {
        Ok(claim) => claim,
        Err(earlier) => {
            tracing::info!(%token, ?earlier, "duplicate contact form submission refused");
            let page = state.pages.render(&duplicate_view(lead, earlier), token)?;
            return Ok((StatusCode::CONFLICT, Html(page)));
        }
    };

    let session = FormSession::with_values(Arc::clone(&state.sink), lead);

    let status = match session.submit().await {
        Ok(FormPhase::Submitted) => {
            claim.consume();
            StatusCode::OK
        }
        Ok(phase) => {
            tracing::debug!(?phase, "lead not accepted by sink");
            StatusCode::BAD_GATEWAY
        }
        Err(FormError::Invalid(errors)) => {
            tracing::debug!(failed = errors.len(), "contact form rejected");
            StatusCode::UNPROCESSABLE_ENTITY
        }
        Err(error) => {
            tracing::warn!(%error, "contact form refused submission");
            StatusCode::CONFLICT
        }
    };

    let page = state.pages.render(&session.snapshot(), token)?;
    Ok((status, Html(page)))
}

/// What a repeated post sees: the disabled submitting control while the first
/// post is in flight, the confirmation after it went through.
fn duplicate_view(lead: LeadInput, earlier: ClaimState) -> LeadForm {
    let mut form = LeadForm::with_values(lead);
    if let Ok(pending) = form.begin_submit() {
        if earlier == ClaimState::Used {
            form.complete(pending, Ok(()));
        }
    }
    form
}
