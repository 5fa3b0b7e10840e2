//! Profile schema validation.
//!
//! Raw upstream records are untrusted JSON. [`validate`] checks one record
//! against the profile shape and either narrows it into a [`Profile`] or
//! reports the first violated constraint.

mod formats;
mod validator;

pub use formats::{is_email, is_timestamp, is_url};
pub use validator::{validate, validate_all};

use std::fmt;

use thiserror::Error;

use crate::models::Profile;

/// Outcome of validating one record.
pub type ValidationResult = Result<Profile, ValidationError>;

/// What was wrong with a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Problem {
    /// Field absent or `null`.
    Missing,
    /// Field present with the wrong JSON type.
    Expected(&'static str),
    /// String field that does not match its format.
    InvalidFormat,
    /// Number that does not fit the target type.
    OutOfRange,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Expected(kind) => write!(f, "expected {}", kind),
            Self::InvalidFormat => write!(f, "invalid format"),
            Self::OutOfRange => write!(f, "out of range"),
        }
    }
}

/// First constraint a record violated, rendered as `"<field>: <problem>"`.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{field}: {problem}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `address.city`
    pub field: String,
    pub problem: Problem,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, problem: Problem) -> Self {
        Self {
            field: field.into(),
            problem,
        }
    }
}
