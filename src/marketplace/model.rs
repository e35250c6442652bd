//! Marketplace models and data structures

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Karma awarded to every new loan request
pub const REQUEST_KARMA_AWARD: u32 = 5;

/// Identifier of a loan request (creation time in milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub i64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A number typed into a text field.
///
/// Form widgets hand us text, so every numeric field keeps track of whether
/// the text was blank, a usable integer, or something else entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NumericInput {
    Empty,
    Value(i64),
    Invalid(String),
}

impl NumericInput {
    /// Parse raw field text.
    ///
    /// Surrounding whitespace is ignored. Decimal input is truncated toward
    /// zero, matching what a browser number field produces for integers.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return NumericInput::Empty;
        }

        if let Ok(value) = trimmed.parse::<i64>() {
            return NumericInput::Value(value);
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value.abs() < i64::MAX as f64 => {
                NumericInput::Value(value.trunc() as i64)
            }
            _ => NumericInput::Invalid(trimmed.to_string()),
        }
    }

    /// The parsed integer, if there is one
    pub fn value(&self) -> Option<i64> {
        match self {
            NumericInput::Value(value) => Some(*value),
            NumericInput::Empty | NumericInput::Invalid(_) => None,
        }
    }
}

/// Loan purposes offered by the request form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    Education,
    Business,
    Home,
    Medical,
    Other,
}

impl Purpose {
    pub const ALL: [Purpose; 5] = [
        Purpose::Education,
        Purpose::Business,
        Purpose::Home,
        Purpose::Medical,
        Purpose::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Education => "Education",
            Purpose::Business => "Business",
            Purpose::Home => "Home",
            Purpose::Medical => "Medical",
            Purpose::Other => "Other",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown loan purpose: '{0}'")]
pub struct ParsePurposeError(pub String);

impl FromStr for Purpose {
    type Err = ParsePurposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Purpose::ALL
            .into_iter()
            .find(|purpose| purpose.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParsePurposeError(trimmed.to_string()))
    }
}

/// Loan request status. Requests never leave `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
}

/// A borrower's loan request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanRequest {
    pub id: RequestId,
    pub amount: NumericInput,
    pub purpose: Option<Purpose>,
    pub duration: NumericInput,
    pub credit_score: NumericInput,
    pub story: Option<String>,
    pub karma: u32,
    pub trust_score: u32,
    pub matches: u32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Role the current user is acting in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Lender,
    Borrower,
}

impl UserType {
    pub fn toggled(self) -> Self {
        match self {
            UserType::Lender => UserType::Borrower,
            UserType::Borrower => UserType::Lender,
        }
    }
}

/// The single session user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub karma: u64,
}

/// Top-level tabs of the marketplace page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Requests,
    Submit,
}

/// Bounds applied to the request list. `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterCriteria {
    pub min_amount: Option<i64>,
    pub max_amount: Option<i64>,
    pub min_duration: Option<i64>,
    pub max_duration: Option<i64>,
}

/// Partial filter edit. Each present field is the new text of that input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterUpdate {
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    pub min_duration: Option<String>,
    pub max_duration: Option<String>,
}

/// In-progress request form, held exactly as typed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RequestDraft {
    pub amount: String,
    pub purpose: String,
    pub duration: String,
    pub credit_score: String,
    pub story: String,
}

/// Partial draft edit. Each present field replaces that form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftUpdate {
    pub amount: Option<String>,
    pub purpose: Option<String>,
    pub duration: Option<String>,
    pub credit_score: Option<String>,
    pub story: Option<String>,
}

impl DraftUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.purpose.is_none()
            && self.duration.is_none()
            && self.credit_score.is_none()
            && self.story.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient banner shown after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Increases with every notification raised in a session
    pub generation: u64,
}
