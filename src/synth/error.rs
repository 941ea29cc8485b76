//! Generator error types

use chrono::NaiveDate;
use std::fmt;

/// Errors raised while validating generator parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// A size or shape parameter would produce degenerate output.
    InvalidParameter { name: &'static str, reason: String },

    /// A date range runs past the representable calendar.
    DateOutOfRange { start: NaiveDate, periods: usize },
}

impl GeneratorError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{}`: {}", name, reason)
            }
            Self::DateOutOfRange { start, periods } => {
                write!(
                    f,
                    "date range starting {} with {} periods exceeds the calendar",
                    start, periods
                )
            }
        }
    }
}

impl std::error::Error for GeneratorError {}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
