//! Synthetic Metrics Generator
//!
//! Deterministically produces the store table, time series, inventory
//! grid and response curves consumed by the dashboard views.
//!
//! # Components
//!
//! - **store_table**: per-store categorical and numeric performance fields
//! - **series**: performance trend, share of voice, seasonality decomposition
//! - **curves**: saturating-exponential diminishing-returns curves
//! - **inventory**: channel x week availability grid
//! - **dataset**: validated parameters, full generation, parallel batches
//!
//! # Determinism
//!
//! Randomness flows through a caller-owned [`SeededRng`]. A seed fully
//! determines a [`DashboardDataset`]; reusing an advancing RNG across
//! calls yields fresh draws on every call.

pub mod calendar;
pub mod curves;
pub mod dataset;
pub mod error;
pub mod inventory;
pub mod rng;
pub mod series;
pub mod store_table;

pub use calendar::{DateRange, Frequency};
pub use curves::{
    diminishing_returns, diminishing_returns_curves, ReturnsCurve, ReturnsPoint, SaturationParams,
    SpendGrid,
};
pub use dataset::{
    generate_dataset, generate_many, generate_with, validate_channels, DashboardDataset,
    GeneratorParams,
};
pub use error::{GeneratorError, GeneratorResult};
pub use inventory::{utilization_grid, InventoryGrid};
pub use rng::{seeded_rng, SeededRng};
pub use series::{
    performance_trend, seasonality, share_of_voice, SeasonalityPoint, SovPoint, TrendPoint,
};
pub use store_table::{
    generate_store_table, store_table_from_rng, StoreRecord, StoreTable, REGIONS, STORE_CHANNELS,
    TIER_LABELS, US_STATE_ABBREV,
};

#[cfg(test)]
mod series_tests;
