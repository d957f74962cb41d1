//! Field catalogue for the lead capture form.
//!
//! Every input the contact form shows is described here: its wire key, label,
//! placeholder, input kind and (for selects) the fixed choice set. Rendering
//! layers read this catalogue instead of hard-coding field lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One `<option>` of a select input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

macro_rules! choice_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire value, as posted by the form and serialized to JSON.
            pub fn value(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Human-readable option text.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Exact match on the wire value. Anything outside the set is `None`.
            pub fn parse(raw: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|choice| choice.value() == raw)
            }

            pub fn options() -> Vec<ChoiceOption> {
                Self::ALL
                    .iter()
                    .map(|choice| ChoiceOption {
                        value: choice.value(),
                        label: choice.label(),
                    })
                    .collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }
    };
}

choice_set! {
    /// Company headcount band.
    EmployeeBand {
        UpTo10 => ("1-10", "1-10 employees"),
        From11To25 => ("11-25", "11-25 employees"),
        From26To50 => ("26-50", "26-50 employees"),
        From51To100 => ("51-100", "51-100 employees"),
        Over100 => ("100+", "100+ employees"),
    }
}

choice_set! {
    /// Annual recurring revenue band.
    ArrBand {
        Under500K => ("< $500K", "Less than $500K"),
        From500KTo1M => ("$500K - $1M", "$500K - $1M"),
        From1MTo5M => ("$1M - $5M", "$1M - $5M"),
        From5MTo10M => ("$5M - $10M", "$5M - $10M"),
        Over10M => ("$10M+", "$10M+"),
    }
}

choice_set! {
    /// How soon the prospect wants to start.
    Timeline {
        Asap => ("ASAP", "As soon as possible"),
        OneToTwoMonths => ("1-2 months", "Within 1-2 months"),
        ThreeToSixMonths => ("3-6 months", "3-6 months"),
        SixPlusMonths => ("6+ months", "6+ months"),
        JustExploring => ("Just exploring", "Just exploring options"),
    }
}

choice_set! {
    /// Monthly budget band.
    BudgetBand {
        Under5K => ("< $5K", "Less than $5,000"),
        From5KTo10K => ("$5K - $10K", "$5,000 - $10,000"),
        From10KTo15K => ("$10K - $15K", "$10,000 - $15,000"),
        Over15K => ("$15K+", "$15,000+"),
        ToBeDiscussed => ("To be discussed", "To be discussed"),
    }
}

/// How a field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Email,
    Select,
    TextArea,
}

/// Every input of the contact form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeadField {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "company")]
    Company,
    #[serde(rename = "role")]
    Role,
    #[serde(rename = "employees")]
    Employees,
    #[serde(rename = "arr")]
    Arr,
    #[serde(rename = "currentAI")]
    CurrentAi,
    #[serde(rename = "goals")]
    Goals,
    #[serde(rename = "timeline")]
    Timeline,
    #[serde(rename = "budget")]
    Budget,
    #[serde(rename = "message")]
    Message,
}

impl LeadField {
    pub const ALL: [LeadField; 11] = [
        LeadField::Name,
        LeadField::Email,
        LeadField::Company,
        LeadField::Role,
        LeadField::Employees,
        LeadField::Arr,
        LeadField::CurrentAi,
        LeadField::Goals,
        LeadField::Timeline,
        LeadField::Budget,
        LeadField::Message,
    ];

    /// Wire key used in JSON bodies, form posts and error maps.
    pub fn key(self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Email => "email",
            LeadField::Company => "company",
            LeadField::Role => "role",
            LeadField::Employees => "employees",
            LeadField::Arr => "arr",
            LeadField::CurrentAi => "currentAI",
            LeadField::Goals => "goals",
            LeadField::Timeline => "timeline",
            LeadField::Budget => "budget",
            LeadField::Message => "message",
        }
    }

    /// Resolve a wire key or a Rust struct field name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "current_ai" => Some(LeadField::CurrentAi),
            _ => Self::ALL.iter().copied().find(|field| field.key() == key),
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, LeadField::Message)
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadField::Name => "Full Name *",
            LeadField::Email => "Email Address *",
            LeadField::Company => "Company Name *",
            LeadField::Role => "Your Role/Title *",
            LeadField::Employees => "Company Size *",
            LeadField::Arr => "Annual Recurring Revenue *",
            LeadField::CurrentAi => "Current AI Usage *",
            LeadField::Goals => "AI Goals & Challenges *",
            LeadField::Timeline => "Implementation Timeline *",
            LeadField::Budget => "Monthly Budget Range *",
            LeadField::Message => "Additional Message",
        }
    }

    /// Placeholder for text inputs; the empty-option prompt for selects.
    pub fn placeholder(self) -> &'static str {
        match self {
            LeadField::Name => "John Doe",
            LeadField::Email => "john@company.com",
            LeadField::Company => "Acme Inc.",
            LeadField::Role => "CEO, CTO, VP of Operations",
            LeadField::Employees => "Select size",
            LeadField::Arr => "Select ARR",
            LeadField::CurrentAi => {
                "Describe any AI tools or workflows you're currently using..."
            }
            LeadField::Goals => {
                "What specific business processes would you like to optimize with AI? What challenges are you facing?"
            }
            LeadField::Timeline => "Select timeline",
            LeadField::Budget => "Select budget",
            LeadField::Message => "Any additional information you'd like to share...",
        }
    }

    pub fn kind(self) -> InputKind {
        match self {
            LeadField::Email => InputKind::Email,
            LeadField::Employees | LeadField::Arr | LeadField::Timeline | LeadField::Budget => {
                InputKind::Select
            }
            LeadField::CurrentAi | LeadField::Goals | LeadField::Message => InputKind::TextArea,
            LeadField::Name | LeadField::Company | LeadField::Role => InputKind::Text,
        }
    }

    /// Visible rows for textareas.
    pub fn rows(self) -> Option<u8> {
        match self {
            LeadField::CurrentAi | LeadField::Message => Some(3),
            LeadField::Goals => Some(4),
            _ => None,
        }
    }

    /// Minimum length in characters for free-text fields.
    pub fn min_length(self) -> Option<usize> {
        match self {
            LeadField::Name | LeadField::Company | LeadField::Role => Some(2),
            LeadField::CurrentAi => Some(10),
            LeadField::Goals => Some(20),
            _ => None,
        }
    }

    pub fn options(self) -> Option<Vec<ChoiceOption>> {
        match self {
            LeadField::Employees => Some(EmployeeBand::options()),
            LeadField::Arr => Some(ArrBand::options()),
            LeadField::Timeline => Some(Timeline::options()),
            LeadField::Budget => Some(BudgetBand::options()),
            _ => None,
        }
    }

    /// Message shown beneath the input when the field fails validation.
    pub fn error_message(self) -> Option<&'static str> {
        match self {
            LeadField::Name => Some("Name must be at least 2 characters"),
            LeadField::Email => Some("Please enter a valid email address"),
            LeadField::Company => Some("Company name is required"),
            LeadField::Role => Some("Role/title is required"),
            LeadField::Employees => Some("Please select company size"),
            LeadField::Arr => Some("Please select ARR range"),
            LeadField::CurrentAi => {
                Some("Please describe your current AI usage (at least 10 characters)")
            }
            LeadField::Goals => Some("Please describe your goals (at least 20 characters)"),
            LeadField::Timeline => Some("Please select your timeline"),
            LeadField::Budget => Some("Please select your budget range"),
            LeadField::Message => None,
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
