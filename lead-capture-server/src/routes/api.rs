//! JSON API for the same lead contract.

use axum::{extract::State, http::StatusCode, Json};
use lead_capture_core::{validate_lead, ChoiceOption, LeadField, LeadInput};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Allowed values for the enumerated fields.
#[derive(Debug, Serialize)]
pub struct LeadOptions {
    pub employees: Vec<ChoiceOption>,
    pub arr: Vec<ChoiceOption>,
    pub timeline: Vec<ChoiceOption>,
    pub budget: Vec<ChoiceOption>,
}

pub async fn lead_options() -> Json<LeadOptions> {
    let options = |field: LeadField| field.options().unwrap_or_default();
    Json(LeadOptions {
        employees: options(LeadField::Employees),
        arr: options(LeadField::Arr),
        timeline: options(LeadField::Timeline),
        budget: options(LeadField::Budget),
    })
}

pub async fn create_lead(
    State(state): State<AppState>,
    Json(input): Json<LeadInput>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let lead = validate_lead(&input).map_err(AppError::Invalid)?;
    state.sink.send_lead(&lead).await?;
    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "submitted" }))))
}
