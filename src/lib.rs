//! Media Dash Library
//!
//! Synthetic marketing-performance data and the dashboard computations
//! built on it. All metrics are illustrative: every number is derived
//! from a seeded RNG.

pub mod config;
pub mod error;
pub mod report;
pub mod synth;
pub mod theme;
pub mod views;

pub use config::DashboardConfig;
pub use error::DashboardError;
pub use report::{DashboardSnapshot, OutputFormat};
pub use synth::{generate_dataset, generate_many, DashboardDataset, GeneratorParams};
