//! Server-side rendering of the contact section.
//!
//! The handlebars template is compiled once; each request renders a view built
//! from a [`LeadForm`] snapshot, so errors, preserved values, the banner and
//! the submit control all come straight from the form state.

use handlebars::{Handlebars, RenderError, TemplateError};
use lead_capture_core::form::{SUBMITTING_LABEL, SUBMIT_ANOTHER_LABEL};
use lead_capture_core::{FormPhase, InputKind, LeadField, LeadForm, SubmitButton};
use serde::Serialize;
use uuid::Uuid;

const CONTACT_TEMPLATE: &str = "contact";

pub struct ContactPages {
    registry: Handlebars<'static>,
}

impl ContactPages {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(
            CONTACT_TEMPLATE,
            include_str!("../templates/contact.hbs"),
        )?;
        Ok(Self { registry })
    }

    /// Render the contact section for the given form state. `token` goes into
    /// the form's hidden submission token input.
    pub fn render(&self, form: &LeadForm, token: Uuid) -> Result<String, RenderError> {
        self.registry
            .render(CONTACT_TEMPLATE, &ContactView::from_form(form, token))
    }
}

#[derive(Debug, Serialize)]
struct ContactView<'a> {
    submitted: bool,
    banner: Option<&'a str>,
    button: SubmitButton,
    submitting_label: &'static str,
    submit_another_label: &'static str,
    submission_token: String,
    fields: Vec<FieldView<'a>>,
}

#[derive(Debug, Serialize)]
struct FieldView<'a> {
    key: &'static str,
    label: &'static str,
    placeholder: &'static str,
    value: &'a str,
    error: Option<&'a str>,
    required: bool,
    input_type: &'static str,
    is_select: bool,
    is_textarea: bool,
    rows: Option<u8>,
    options: Vec<OptionView>,
}

#[derive(Debug, Serialize)]
struct OptionView {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

impl<'a> ContactView<'a> {
    fn from_form(form: &'a LeadForm, token: Uuid) -> Self {
        let fields = LeadField::ALL
            .into_iter()
            .map(|field| FieldView::new(form, field))
            .collect();

        Self {
            submitted: form.phase() == FormPhase::Submitted,
            banner: form.banner(),
            button: form.submit_button(),
            submitting_label: SUBMITTING_LABEL,
            submit_another_label: SUBMIT_ANOTHER_LABEL,
            submission_token: token.to_string(),
            fields,
        }
    }
}

impl<'a> FieldView<'a> {
    fn new(form: &'a LeadForm, field: LeadField) -> Self {
        let value = form.values().get(field);
        let kind = field.kind();
        let options = field
            .options()
            .unwrap_or_default()
            .into_iter()
            .map(|option| OptionView {
                value: option.value,
                label: option.label,
                selected: option.value == value,
            })
            .collect();

        Self {
            key: field.key(),
            label: field.label(),
            placeholder: field.placeholder(),
            value,
            error: form.error_for(field),
            required: field.is_required(),
            input_type: match kind {
                InputKind::Email => "email",
                _ => "text",
            },
            is_select: kind == InputKind::Select,
            is_textarea: kind == InputKind::TextArea,
            rows: field.rows(),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_capture_core::form::SUBMIT_LABEL;
    use lead_capture_core::{LeadInput, SinkError};

    fn render(pages: &ContactPages, form: &LeadForm) -> String {
        pages.render(form, Uuid::nil()).unwrap()
    }

    fn filled() -> LeadInput {
        LeadInput {
            name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            company: "Compilers Inc".into(),
            role: "Rear Admiral".into(),
            employees: "11-25".into(),
            arr: "$10M+".into(),
            current_ai: "Nothing in production yet".into(),
            goals: "Triage inbound support tickets automatically".into(),
            timeline: "ASAP".into(),
            budget: "$15K+".into(),
            message: None,
        }
    }

    #[test]
    fn empty_form_renders_every_field() {
        let pages = ContactPages::new().unwrap();
        let html = render(&pages, &LeadForm::new());

        for field in LeadField::ALL {
            assert!(
                html.contains(&format!("name=\"{}\"", field.key())),
                "missing input for {field}"
            );
        }
        assert!(html.contains(SUBMIT_LABEL));
        assert!(html.contains("Select size"));
        assert!(html.contains("Just exploring options"));
        assert!(!html.contains("field-error"));
        assert!(html.contains(&format!(
            "name=\"submission_token\" value=\"{}\"",
            Uuid::nil()
        )));
        assert!(html.contains("data-submitting-label=\"Submitting...\""));
        assert!(!html.contains("disabled>"));
    }

    #[test]
    fn errors_render_beneath_inputs_and_values_stay() {
        let mut input = filled();
        input.current_ai = "short".into();
        let mut form = LeadForm::with_values(input);
        assert!(form.begin_submit().is_err());

        let html = render(&ContactPages::new().unwrap(), &form);
        assert!(html.contains("Please describe your current AI usage (at least 10 characters)"));
        assert!(html.contains("value=\"Grace Hopper\""));
        assert!(html.contains(">short</textarea>"));
        assert!(html.contains("value=\"11-25\" selected"));
    }

    #[test]
    fn submitting_disables_the_control() {
        let mut form = LeadForm::with_values(filled());
        let _pending = form.begin_submit().unwrap();

        let html = render(&ContactPages::new().unwrap(), &form);
        assert!(html.contains("<button type=\"submit\" disabled>Submitting...</button>"));
    }

    #[test]
    fn failure_banner_and_confirmation() {
        let pages = ContactPages::new().unwrap();
        let mut form = LeadForm::with_values(filled());

        let pending = form.begin_submit().unwrap();
        form.complete(pending, Err(SinkError::Timeout));
        let html = render(&pages, &form);
        assert!(html.contains("form-banner"));
        assert!(html.contains("submit your request. Please try again."));

        let pending = form.begin_submit().unwrap();
        form.complete(pending, Ok(()));
        let html = render(&pages, &form);
        assert!(html.contains("Thank You!"));
        assert!(html.contains(SUBMIT_ANOTHER_LABEL));
        assert!(!html.contains("Grace Hopper"));
    }
}
