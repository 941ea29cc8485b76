//! Scenario Modeling + Planning panel
//!
//! Everything here is placeholder arithmetic: a fixed media-mix table, a
//! linear forecast off total spend, and fixed-share budget splits.

use serde::{Deserialize, Serialize};

use super::error::ViewError;

/// Upper bound of each scenario spend slider.
pub const SCENARIO_SPEND_MAX: u32 = 10_000;
/// Forecasted bookings per dollar of spend.
pub const BOOKINGS_PER_DOLLAR: f64 = 0.1;
/// Forecasted revenue per dollar of spend.
pub const REVENUE_PER_DOLLAR: f64 = 2.0;
/// Default incremental budget.
pub const DEFAULT_INCREMENTAL_SPEND: f64 = 1_000.0;
/// Incremental budgets are whole multiples of this amount.
pub const INCREMENTAL_SPEND_STEP: f64 = 100.0;

const SHARE_TOLERANCE: f64 = 1e-9;

// =============================================================================
// MEDIA MIX RECOMMENDATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixRecommendation {
    #[serde(rename = "Channel")]
    pub channel: String,
    #[serde(rename = "Current Spend")]
    pub current_spend: u32,
    #[serde(rename = "Recommended Additional Spend")]
    pub recommended_additional_spend: u32,
    #[serde(rename = "Projected ROI")]
    pub projected_roi: f64,
}

/// Static optimal media mix table.
pub fn media_mix_recommendation() -> Vec<MixRecommendation> {
    [
        ("Search", 5_000, 1_000, 2.5),
        ("Social", 3_000, 500, 1.8),
        ("Display", 2_000, 200, 1.3),
    ]
    .into_iter()
    .map(|(channel, current, additional, roi)| MixRecommendation {
        channel: channel.to_string(),
        current_spend: current,
        recommended_additional_spend: additional,
        projected_roi: roi,
    })
    .collect()
}

// =============================================================================
// SCENARIO FORECAST
// =============================================================================

/// Slider positions of the MMM scenario panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSpend {
    pub search: u32,
    pub social: u32,
    pub display: u32,
}

impl Default for ChannelSpend {
    fn default() -> Self {
        Self {
            search: 5_000,
            social: 3_000,
            display: 2_000,
        }
    }
}

impl ChannelSpend {
    pub fn validate(&self) -> Result<(), ViewError> {
        for (channel, value) in [
            ("Search", self.search),
            ("Social", self.social),
            ("Display", self.display),
        ] {
            if value > SCENARIO_SPEND_MAX {
                return Err(ViewError::SpendOutOfRange {
                    channel,
                    value,
                    max: SCENARIO_SPEND_MAX,
                });
            }
        }
        Ok(())
    }

    pub fn total(&self) -> u64 {
        u64::from(self.search) + u64::from(self.social) + u64::from(self.display)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioForecast {
    pub total_spend: u64,
    pub forecasted_bookings: u64,
    pub forecasted_revenue: f64,
}

pub fn forecast(spend: &ChannelSpend) -> Result<ScenarioForecast, ViewError> {
    spend.validate()?;
    let total = spend.total();
    Ok(ScenarioForecast {
        total_spend: total,
        forecasted_bookings: (total as f64 * BOOKINGS_PER_DOLLAR).floor() as u64,
        forecasted_revenue: total as f64 * REVENUE_PER_DOLLAR,
    })
}

// =============================================================================
// INCREMENTAL SPEND ALLOCATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationShare {
    pub channel: String,
    pub share: f64,
}

/// Fixed split of an incremental budget across channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationPlan {
    shares: Vec<AllocationShare>,
}

impl Default for AllocationPlan {
    fn default() -> Self {
        Self {
            shares: [("Search", 0.5), ("Social", 0.3), ("Display", 0.2)]
                .into_iter()
                .map(|(channel, share)| AllocationShare {
                    channel: channel.to_string(),
                    share,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAllocation {
    pub channel: String,
    pub amount: f64,
}

impl AllocationPlan {
    pub fn new(shares: Vec<AllocationShare>) -> Result<Self, ViewError> {
        let plan = Self { shares };
        plan.validate()?;
        Ok(plan)
    }

    pub fn shares(&self) -> &[AllocationShare] {
        &self.shares
    }

    pub fn validate(&self) -> Result<(), ViewError> {
        if self.shares.is_empty() {
            return Err(ViewError::InvalidAllocation("no channels".to_string()));
        }
        for s in &self.shares {
            if s.channel.trim().is_empty() {
                return Err(ViewError::InvalidAllocation(
                    "channel name is blank".to_string(),
                ));
            }
            if !s.share.is_finite() || s.share < 0.0 {
                return Err(ViewError::InvalidAllocation(format!(
                    "{} share {} is negative",
                    s.channel, s.share
                )));
            }
        }
        let total: f64 = self.shares.iter().map(|s| s.share).sum();
        if (total - 1.0).abs() > SHARE_TOLERANCE {
            return Err(ViewError::InvalidAllocation(format!(
                "shares sum to {}, expected 1",
                total
            )));
        }
        Ok(())
    }

    /// Split `amount` by share, in plan order.
    pub fn allocate(&self, amount: f64) -> Result<Vec<ChannelAllocation>, ViewError> {
        if !amount.is_finite() || amount < 0.0 || amount % INCREMENTAL_SPEND_STEP != 0.0 {
            return Err(ViewError::InvalidAmount(amount));
        }
        self.validate()?;
        Ok(self
            .shares
            .iter()
            .map(|s| ChannelAllocation {
                channel: s.channel.clone(),
                amount: amount * s.share,
            })
            .collect())
    }
}
