//! Loan request form intake
//!
//! Turns the raw text of the request form into typed loan terms. The lenient
//! policy accepts anything the form sends; the strict policy applies
//! field-level validation before a request may be created.

use serde::Serialize;
use thiserror::Error;
use validator::Validate;

use super::model::{NumericInput, ParsePurposeError, Purpose, RequestDraft};

/// Longest story accepted under the strict policy
pub const MAX_STORY_CHARS: u64 = 2000;

/// How much checking a submitted draft receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakePolicy {
    #[default]
    Lenient,
    Strict,
}

impl IntakePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Some(IntakePolicy::Lenient),
            "strict" => Some(IntakePolicy::Strict),
            _ => None,
        }
    }
}

/// Intake errors
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field '{field}' is not a number: '{input}'")]
    NotANumber { field: &'static str, input: String },

    #[error(transparent)]
    Purpose(#[from] ParsePurposeError),

    #[error("Invalid loan request: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Normalized contents of a submitted draft
#[derive(Debug, Clone, PartialEq)]
pub struct LoanTerms {
    pub amount: NumericInput,
    pub purpose: Option<Purpose>,
    pub duration: NumericInput,
    pub credit_score: NumericInput,
    pub story: Option<String>,
}

#[derive(Debug, Validate)]
struct CheckedTerms {
    #[validate(range(min = 1))]
    amount: i64,
    #[validate(range(min = 1))]
    duration: i64,
    #[validate(range(min = 300, max = 850))]
    credit_score: i64,
    #[validate(length(max = 2000))]
    story: Option<String>,
}

/// Convert a draft into loan terms under the given policy
pub fn accept(draft: &RequestDraft, policy: IntakePolicy) -> Result<LoanTerms, IntakeError> {
    let terms = normalize(draft);

    if policy == IntakePolicy::Strict {
        check(draft, &terms)?;
    }

    Ok(terms)
}

fn normalize(draft: &RequestDraft) -> LoanTerms {
    let purpose = match draft.purpose.trim() {
        "" => None,
        raw => match raw.parse::<Purpose>() {
            Ok(purpose) => Some(purpose),
            Err(e) => {
                tracing::debug!(error = %e, "Accepting draft without a recognised purpose");
                None
            }
        },
    };

    let story = Some(draft.story.trim())
        .filter(|story| !story.is_empty())
        .map(str::to_string);

    LoanTerms {
        amount: NumericInput::parse(&draft.amount),
        purpose,
        duration: NumericInput::parse(&draft.duration),
        credit_score: NumericInput::parse(&draft.credit_score),
        story,
    }
}

fn check(draft: &RequestDraft, terms: &LoanTerms) -> Result<(), IntakeError> {
    if draft.purpose.trim().is_empty() {
        return Err(IntakeError::MissingField("purpose"));
    }
    draft.purpose.parse::<Purpose>()?;

    let checked = CheckedTerms {
        amount: required_number("amount", &terms.amount)?,
        duration: required_number("duration", &terms.duration)?,
        credit_score: required_number("credit_score", &terms.credit_score)?,
        story: terms.story.clone(),
    };
    checked.validate()?;

    Ok(())
}

fn required_number(field: &'static str, input: &NumericInput) -> Result<i64, IntakeError> {
    match input {
        NumericInput::Value(value) => Ok(*value),
        NumericInput::Empty => Err(IntakeError::MissingField(field)),
        NumericInput::Invalid(raw) => Err(IntakeError::NotANumber {
            field,
            input: raw.clone(),
        }),
    }
}
