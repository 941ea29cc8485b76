//! Crate-level error type

use std::fmt;

use crate::synth::GeneratorError;
use crate::views::ViewError;

/// Anything that can abort building a dashboard snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    Generator(GeneratorError),
    View(ViewError),
    /// A configuration value outside the generator and views.
    Config(String),
    /// Snapshot could not be serialized.
    Serialize(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generator(e) => write!(f, "generation failed: {}", e),
            Self::View(e) => write!(f, "view failed: {}", e),
            Self::Config(e) => write!(f, "invalid config: {}", e),
            Self::Serialize(e) => write!(f, "serialization failed: {}", e),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Generator(e) => Some(e),
            Self::View(e) => Some(e),
            Self::Config(_) | Self::Serialize(_) => None,
        }
    }
}

impl From<GeneratorError> for DashboardError {
    fn from(e: GeneratorError) -> Self {
        Self::Generator(e)
    }
}

impl From<ViewError> for DashboardError {
    fn from(e: ViewError) -> Self {
        Self::View(e)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e.to_string())
    }
}
