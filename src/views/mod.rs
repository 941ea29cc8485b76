//! Dashboard Views
//!
//! Deterministic computations the dashboard panels display: overview
//! tiles, the DMA/region filter, spend and revenue aggregation, and the
//! scenario-planning placeholders.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod overview;
pub mod scenario;

pub use aggregate::{revenue_per_office, spend_by_dma, DmaSpend, OfficeRevenue};
pub use error::ViewError;
pub use filter::StoreFilter;
pub use overview::{GoalMetric, GoalTarget, OverviewMetrics, PLACEHOLDER_GOAL_ATTAINMENT};
pub use scenario::{
    forecast, media_mix_recommendation, AllocationPlan, AllocationShare, ChannelAllocation,
    ChannelSpend, MixRecommendation, ScenarioForecast,
};
