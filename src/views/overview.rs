//! Overview tiles and goal tracking

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ViewError;
use super::scenario::REVENUE_PER_DOLLAR;
use crate::synth::StoreTable;

/// Goal attainment shown when no goal value has been entered.
pub const PLACEHOLDER_GOAL_ATTAINMENT: f64 = 0.85;

// =============================================================================
// GOALS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GoalMetric {
    #[default]
    Bookings,
    Revenue,
    #[serde(rename = "Patient-to-Slot Ratio")]
    PatientToSlotRatio,
}

impl GoalMetric {
    /// Actual value of the metric over a (filtered) table.
    pub fn actual(&self, table: &StoreTable) -> Option<f64> {
        match self {
            GoalMetric::Bookings => Some(table.iter().map(|r| f64::from(r.total_bookings)).sum()),
            GoalMetric::Revenue => Some(estimated_revenue(table)),
            GoalMetric::PatientToSlotRatio => mean(table.iter().map(|r| r.patient_to_slot_ratio)),
        }
    }
}

impl fmt::Display for GoalMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalMetric::Bookings => write!(f, "Bookings"),
            GoalMetric::Revenue => write!(f, "Revenue"),
            GoalMetric::PatientToSlotRatio => write!(f, "Patient-to-Slot Ratio"),
        }
    }
}

impl FromStr for GoalMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s
            .to_ascii_lowercase()
            .replace(|c: char| matches!(c, '-' | '_' | ' '), "");
        match key.as_str() {
            "bookings" => Ok(GoalMetric::Bookings),
            "revenue" => Ok(GoalMetric::Revenue),
            "patienttoslotratio" | "psr" => Ok(GoalMetric::PatientToSlotRatio),
            _ => Err(format!("unknown goal metric: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalTarget {
    pub metric: GoalMetric,
    pub value: f64,
}

impl GoalTarget {
    pub fn new(metric: GoalMetric, value: f64) -> Result<Self, ViewError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ViewError::InvalidGoal(value));
        }
        Ok(Self { metric, value })
    }

    /// `actual / goal`; `None` when the metric is undefined (empty table).
    pub fn attainment(&self, table: &StoreTable) -> Option<f64> {
        self.metric.actual(table).map(|actual| actual / self.value)
    }
}

// =============================================================================
// OVERVIEW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewMetrics {
    pub total_online_bookings: u64,
    /// Spend x 2
    pub total_revenue: f64,
    pub average_cac: Option<f64>,
    pub goal_attainment: Option<f64>,
}

impl OverviewMetrics {
    /// Tiles over the full table. Goal attainment uses `goal_scope`
    /// (normally the filtered table) and falls back to the placeholder.
    pub fn compute(table: &StoreTable, goal: Option<&GoalTarget>, goal_scope: &StoreTable) -> Self {
        let goal_attainment = match goal {
            Some(goal) => goal.attainment(goal_scope),
            None => Some(PLACEHOLDER_GOAL_ATTAINMENT),
        };
        Self {
            total_online_bookings: table.iter().map(|r| u64::from(r.online_bookings)).sum(),
            total_revenue: estimated_revenue(table),
            average_cac: mean(table.iter().map(|r| r.total_cac)),
            goal_attainment,
        }
    }
}

fn estimated_revenue(table: &StoreTable) -> f64 {
    table.iter().map(|r| f64::from(r.spend)).sum::<f64>() * REVENUE_PER_DOLLAR
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::generate_store_table;

    #[test]
    fn test_overview_tiles() {
        let table = generate_store_table(42, 50).unwrap();
        let overview = OverviewMetrics::compute(&table, None, &table);

        let online: u64 = table.iter().map(|r| u64::from(r.online_bookings)).sum();
        let spend: u64 = table.iter().map(|r| u64::from(r.spend)).sum();
        assert_eq!(overview.total_online_bookings, online);
        assert_eq!(overview.total_revenue, spend as f64 * 2.0);
        assert_eq!(overview.goal_attainment, Some(PLACEHOLDER_GOAL_ATTAINMENT));

        let cac = overview.average_cac.unwrap();
        assert!((10.0..=100.0).contains(&cac));
    }

    #[test]
    fn test_goal_attainment_against_bookings() {
        let table = generate_store_table(42, 10).unwrap();
        let total: u32 = table.iter().map(|r| r.total_bookings).sum();
        let goal = GoalTarget::new(GoalMetric::Bookings, f64::from(total) * 2.0).unwrap();
        let overview = OverviewMetrics::compute(&table, Some(&goal), &table);
        assert!((overview.goal_attainment.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_goal_on_empty_scope() {
        let table = generate_store_table(42, 10).unwrap();
        let empty = StoreTable::default();
        let ratio = GoalTarget::new(GoalMetric::PatientToSlotRatio, 1.0).unwrap();
        assert_eq!(ratio.attainment(&empty), None);
        let revenue = GoalTarget::new(GoalMetric::Revenue, 1000.0).unwrap();
        assert_eq!(revenue.attainment(&empty), Some(0.0));
        assert!(OverviewMetrics::compute(&table, Some(&ratio), &empty)
            .goal_attainment
            .is_none());
    }

    #[test]
    fn test_goal_value_validation() {
        assert!(GoalTarget::new(GoalMetric::Revenue, 0.0).is_err());
        assert!(GoalTarget::new(GoalMetric::Revenue, f64::INFINITY).is_err());
    }

    #[test]
    fn test_goal_metric_parse() {
        assert_eq!(
            "Patient-to-Slot Ratio".parse::<GoalMetric>().unwrap(),
            GoalMetric::PatientToSlotRatio
        );
        assert_eq!("revenue".parse::<GoalMetric>().unwrap(), GoalMetric::Revenue);
        assert!("cac".parse::<GoalMetric>().is_err());
    }
}
