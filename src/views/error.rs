//! View error types

use std::fmt;

/// Errors raised by dashboard view inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewError {
    /// Scenario slider outside its allowed range.
    SpendOutOfRange {
        channel: &'static str,
        value: u32,
        max: u32,
    },
    /// Incremental spend must be a non-negative multiple of the input step.
    InvalidAmount(f64),
    /// Allocation shares are negative, unnamed, or do not sum to one.
    InvalidAllocation(String),
    /// Goal value must be positive and finite.
    InvalidGoal(f64),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpendOutOfRange {
                channel,
                value,
                max,
            } => write!(f, "{} spend {} outside [0, {}]", channel, value, max),
            Self::InvalidAmount(v) => write!(f, "invalid incremental spend amount: {}", v),
            Self::InvalidAllocation(reason) => write!(f, "invalid allocation: {}", reason),
            Self::InvalidGoal(v) => write!(f, "goal value must be positive, got {}", v),
        }
    }
}

impl std::error::Error for ViewError {}
