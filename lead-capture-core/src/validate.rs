//! Raw form input and its validation into a [`LeadSubmission`].
//!
//! Validation is all-or-nothing: every field is checked independently and
//! either a complete submission or the full set of field errors comes back.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::FieldErrors;
use crate::fields::{ArrBand, BudgetBand, EmployeeBand, LeadField, Timeline};

/// Values exactly as entered, one string per field.
///
/// Missing keys deserialize as empty strings so a partial post still produces
/// per-field errors instead of a decode failure. Minimum lengths count Unicode
/// scalar values, so a single emoji is one character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LeadInput {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 2, message = "Company name is required"))]
    pub company: String,

    #[validate(length(min = 2, message = "Role/title is required"))]
    pub role: String,

    pub employees: String,

    pub arr: String,

    #[serde(rename = "currentAI", alias = "current_ai")]
    #[validate(length(
        min = 10,
        message = "Please describe your current AI usage (at least 10 characters)"
    ))]
    pub current_ai: String,

    #[validate(length(
        min = 20,
        message = "Please describe your goals (at least 20 characters)"
    ))]
    pub goals: String,

    pub timeline: String,

    pub budget: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Local part without leading, trailing or doubled dots; a dotted domain
/// ending in an alphabetic TLD of two or more letters. No IP literals.
static EMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z0-9_'+\-]+\.)*[A-Za-z0-9_'+\-]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .unwrap()
});

/// A lead that passed every field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub employees: EmployeeBand,
    pub arr: ArrBand,
    #[serde(rename = "currentAI")]
    pub current_ai: String,
    pub goals: String,
    pub timeline: Timeline,
    pub budget: BudgetBand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LeadInput {
    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Email => &self.email,
            LeadField::Company => &self.company,
            LeadField::Role => &self.role,
            LeadField::Employees => &self.employees,
            LeadField::Arr => &self.arr,
            LeadField::CurrentAi => &self.current_ai,
            LeadField::Goals => &self.goals,
            LeadField::Timeline => &self.timeline,
            LeadField::Budget => &self.budget,
            LeadField::Message => self.message.as_deref().unwrap_or(""),
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            LeadField::Name => &mut self.name,
            LeadField::Email => &mut self.email,
            LeadField::Company => &mut self.company,
            LeadField::Role => &mut self.role,
            LeadField::Employees => &mut self.employees,
            LeadField::Arr => &mut self.arr,
            LeadField::CurrentAi => &mut self.current_ai,
            LeadField::Goals => &mut self.goals,
            LeadField::Timeline => &mut self.timeline,
            LeadField::Budget => &mut self.budget,
            LeadField::Message => {
                self.message = Some(value);
                return;
            }
        };
        *slot = value;
    }

    /// True when nothing has been entered in any field.
    pub fn is_blank(&self) -> bool {
        LeadField::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Check every field and build the typed submission.
    pub fn to_submission(&self) -> Result<LeadSubmission, FieldErrors> {
        validate_lead(self)
    }
}

/// Validate raw input. Returns every failing field, never a partial result.
pub fn validate_lead(input: &LeadInput) -> Result<LeadSubmission, FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Err(report) = input.validate() {
        for (key, failures) in report.field_errors() {
            let Some(field) = LeadField::from_key(&key) else {
                tracing::warn!(key = %key, "validation error for unknown field");
                continue;
            };
            let message = failures
                .iter()
                .find_map(|failure| failure.message.as_deref().map(str::to_owned))
                .or_else(|| field.error_message().map(str::to_owned))
                .unwrap_or_else(|| format!("{} is invalid", field.key()));
            errors.insert(field, message);
        }
    }

    if !errors.contains(LeadField::Email) && !EMAIL_ADDRESS.is_match(&input.email) {
        if let Some(message) = LeadField::Email.error_message() {
            errors.insert(LeadField::Email, message);
        }
    }

    let employees = choice(&mut errors, LeadField::Employees, &input.employees, EmployeeBand::parse);
    let arr = choice(&mut errors, LeadField::Arr, &input.arr, ArrBand::parse);
    let timeline = choice(&mut errors, LeadField::Timeline, &input.timeline, Timeline::parse);
    let budget = choice(&mut errors, LeadField::Budget, &input.budget, BudgetBand::parse);

    match (employees, arr, timeline, budget) {
        (Some(employees), Some(arr), Some(timeline), Some(budget)) if errors.is_empty() => {
            Ok(LeadSubmission {
                name: input.name.clone(),
                email: input.email.clone(),
                company: input.company.clone(),
                role: input.role.clone(),
                employees,
                arr,
                current_ai: input.current_ai.clone(),
                goals: input.goals.clone(),
                timeline,
                budget,
                message: input.message.clone().filter(|m| !m.is_empty()),
            })
        }
        _ => Err(errors),
    }
}

fn choice<T>(
    errors: &mut FieldErrors,
    field: LeadField,
    raw: &str,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    let parsed = parse(raw);
    if parsed.is_none() {
        if let Some(message) = field.error_message() {
            errors.insert(field, message);
        }
    }
    parsed
}
