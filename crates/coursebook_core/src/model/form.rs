//! Shared form-input parsing for record drafts.
//!
//! # Responsibility
//! - Turn raw text field input into typed values.
//! - Report the first failing field so callers can refuse submission.
//!
//! # Invariants
//! - Required fields are trimmed before the blank check.
//! - Parsing never panics on user input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Form submission rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Required field is empty or whitespace-only.
    MissingField(&'static str),
    /// Numeric field could not be parsed.
    InvalidNumber { field: &'static str, value: String },
    /// Optional email field is filled but malformed.
    InvalidEmail(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::InvalidNumber { field, value } => {
                write!(f, "field `{field}` expects a number, got `{value}`")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for FormError {}

pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn required_u32(field: &'static str, value: &str) -> Result<u32, FormError> {
    let trimmed = required_text(field, value)?;
    trimmed.parse::<u32>().map_err(|_| FormError::InvalidNumber {
        field,
        value: trimmed,
    })
}

pub(crate) fn required_price(field: &'static str, value: &str) -> Result<f64, FormError> {
    let trimmed = required_text(field, value)?;
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Ok(parsed),
        _ => Err(FormError::InvalidNumber {
            field,
            value: trimmed,
        }),
    }
}

pub(crate) fn optional_email(value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || EMAIL_RE.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }
    Err(FormError::InvalidEmail(trimmed.to_string()))
}
