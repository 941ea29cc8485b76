//! Dashboard Report Generation
//!
//! Builds a full dashboard snapshot from a config and renders it as
//! themed terminal text or JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::synth::{generate_with, seeded_rng, DashboardDataset, StoreTable};
use crate::theme::{format_banner, BannerStyle, Palette};
use crate::views::{
    forecast, media_mix_recommendation, revenue_per_office, spend_by_dma, ChannelAllocation,
    ChannelSpend, DmaSpend, GoalTarget, MixRecommendation, OfficeRevenue, OverviewMetrics,
    ScenarioForecast, StoreFilter,
};

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Everything one dashboard render shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub dataset: DashboardDataset,
    pub overview: OverviewMetrics,
    pub goal: Option<GoalTarget>,
    pub filter: StoreFilter,
    pub filtered_stores: StoreTable,
    pub spend_by_dma: Vec<DmaSpend>,
    pub revenue_per_office: Vec<OfficeRevenue>,
    pub recommendation: Vec<MixRecommendation>,
    pub scenario: ChannelSpend,
    pub forecast: ScenarioForecast,
    pub incremental_spend: f64,
    pub allocation: Vec<ChannelAllocation>,
}

impl DashboardSnapshot {
    /// Validate the config, generate the dataset and compute every view.
    ///
    /// One RNG seeded from `config.generator.seed` drives the dataset and
    /// then the revenue multipliers, so a seed fixes the whole snapshot.
    pub fn build(config: &DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;

        let mut rng = seeded_rng(config.generator.seed);
        let dataset = generate_with(&mut rng, &config.generator)?;

        let filter = StoreFilter::resolve(
            &dataset.stores,
            config.filter.dmas.clone(),
            config.filter.regions.clone(),
        );
        let filtered_stores = filter.apply(&dataset.stores);

        let goal = config.goal.target()?;
        let overview = OverviewMetrics::compute(&dataset.stores, goal.as_ref(), &filtered_stores);
        let dma_totals = spend_by_dma(&filtered_stores);
        let revenue = revenue_per_office(&mut rng, &filtered_stores);
        let scenario_forecast = forecast(&config.scenario)?;
        let allocation = config.allocation.allocate(config.incremental_spend)?;

        info!(
            seed = config.generator.seed,
            stores = dataset.stores.len(),
            filtered = filtered_stores.len(),
            "Built dashboard snapshot"
        );

        Ok(Self {
            dataset,
            overview,
            goal,
            filter,
            filtered_stores,
            spend_by_dma: dma_totals,
            revenue_per_office: revenue,
            recommendation: media_mix_recommendation(),
            scenario: config.scenario,
            forecast: scenario_forecast,
            incremental_spend: config.incremental_spend,
            allocation,
        })
    }

    pub fn to_json(&self) -> Result<String, DashboardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render every panel as text. `table_rows` caps the store table.
    pub fn render_text(&self, palette: &Palette, table_rows: usize) -> String {
        let mut out = String::new();

        out.push_str(&format_banner(
            palette,
            "MEDIA PERFORMANCE DASHBOARD",
            &[format!(
                "Seed {}  |  {} stores  |  {} channels",
                self.dataset.seed,
                self.dataset.stores.len(),
                self.dataset.diminishing_returns.len()
            )],
            BannerStyle::Primary,
        ));
        out.push('\n');
        out.push_str(&format_banner(palette, "Overview", &self.overview_lines(), BannerStyle::Info));
        out.push('\n');
        out.push_str(&format_banner(
            palette,
            "Performance View",
            &self.performance_lines(table_rows),
            BannerStyle::Info,
        ));
        out.push('\n');
        out.push_str(&format_banner(
            palette,
            "Scenario Modeling + Planning",
            &self.scenario_lines(),
            BannerStyle::Warning,
        ));
        out
    }

    fn overview_lines(&self) -> Vec<String> {
        let o = &self.overview;
        let mut lines = vec![
            format!("Total Online Bookings   {}", thousands(o.total_online_bookings)),
            format!("Total Revenue           {}", money(o.total_revenue)),
            format!(
                "Average CAC             {}",
                o.average_cac.map(money).unwrap_or_else(|| "n/a".to_string())
            ),
            format!(
                "Goal Attainment         {}",
                o.goal_attainment
                    .map(|a| format!("{:.0}%", a * 100.0))
                    .unwrap_or_else(|| "n/a".to_string())
            ),
        ];
        if let Some(goal) = &self.goal {
            lines.push(format!("  goal: {} = {}", goal.metric, goal.value));
        }

        let trend = &self.dataset.performance_trend;
        if let (Some(first), Some(last)) = (trend.first(), trend.last()) {
            lines.push(String::new());
            lines.push("Performance Trend".to_string());
            lines.push(format!(
                "  {}  actual {:>9.2}  predicted {:>9.2}",
                first.date, first.actual, first.predicted
            ));
            lines.push(format!(
                "  {}  actual {:>9.2}  predicted {:>9.2}",
                last.date, last.actual, last.predicted
            ));
        }

        lines.push(String::new());
        lines.push("Share of Voice by Region (mean)".to_string());
        for region in self.dataset.stores.distinct_regions() {
            let values: Vec<f64> = self
                .dataset
                .share_of_voice
                .iter()
                .filter(|p| p.region == region)
                .map(|p| p.share_of_voice)
                .collect();
            if !values.is_empty() {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                lines.push(format!("  {:<6} {:.3}  ({} weeks)", region, mean, values.len()));
            }
        }
        lines
    }

    fn performance_lines(&self, table_rows: usize) -> Vec<String> {
        let mut lines = vec![
            format!("DMA:    {}", self.filter.dmas.join(", ")),
            format!("Region: {}", self.filter.regions.join(", ")),
            String::new(),
            format!(
                "{:<10} {:<4} {:<6} {:<8} {:>6} {:>7} {:>9}",
                "Store", "DMA", "Region", "Channel", "Spend", "Online", "Total CAC"
            ),
        ];
        for r in self.filtered_stores.iter().take(table_rows) {
            lines.push(format!(
                "{:<10} {:<4} {:<6} {:<8} {:>6} {:>7} {:>9.2}",
                r.store, r.dma, r.region, r.channel, r.spend, r.online_bookings, r.total_cac
            ));
        }
        let hidden = self.filtered_stores.len().saturating_sub(table_rows);
        if hidden > 0 {
            lines.push(format!("... {} more rows", hidden));
        }
        if self.filtered_stores.is_empty() {
            lines.push("(no stores match the selection)".to_string());
        }

        lines.push(String::new());
        lines.push("Media Spend by DMA".to_string());
        for d in &self.spend_by_dma {
            lines.push(format!("  {:<4} {:>10}", d.dma, thousands(d.spend)));
        }

        lines.push(String::new());
        lines.push("Revenue per Office".to_string());
        for r in &self.revenue_per_office {
            lines.push(format!("  {:<10} {:>12}", r.store, money(r.revenue)));
        }
        lines
    }

    fn scenario_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Optimal Media Mix".to_string(),
            format!(
                "  {:<8} {:>8} {:>11} {:>6}",
                "Channel", "Current", "Additional", "ROI"
            ),
        ];
        for m in &self.recommendation {
            lines.push(format!(
                "  {:<8} {:>8} {:>11} {:>6.1}",
                m.channel,
                thousands(u64::from(m.current_spend)),
                thousands(u64::from(m.recommended_additional_spend)),
                m.projected_roi
            ));
        }

        lines.push(String::new());
        lines.push("Scenario Modeling (based on MMM)".to_string());
        lines.push(format!(
            "  Search {}  Social {}  Display {}",
            thousands(u64::from(self.scenario.search)),
            thousands(u64::from(self.scenario.social)),
            thousands(u64::from(self.scenario.display))
        ));
        lines.push(format!(
            "  Forecasted Bookings {}",
            thousands(self.forecast.forecasted_bookings)
        ));
        lines.push(format!(
            "  Forecasted Revenue  {}",
            money(self.forecast.forecasted_revenue)
        ));

        let inventory = &self.dataset.inventory;
        lines.push(String::new());
        lines.push(format!(
            "Inventory Utilization ({} weeks from {})",
            inventory.weeks.len(),
            inventory
                .weeks
                .first()
                .map(|d| d.to_string())
                .unwrap_or_default()
        ));
        for (channel, row) in inventory.channels.iter().zip(&inventory.availability) {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>2}", v)).collect();
            let mean = inventory
                .channel_mean(channel)
                .map(|m| format!("{:.1}%", m))
                .unwrap_or_else(|| "n/a".to_string());
            lines.push(format!("  {:<8} {}  avg {}", channel, cells.join(" "), mean));
        }

        lines.push(String::new());
        lines.push(format!(
            "Incremental Spend Recommendation for {}",
            money(self.incremental_spend)
        ));
        for a in &self.allocation {
            lines.push(format!("  {:<8} {}", a.channel, money(a.amount)));
        }

        let season = &self.dataset.seasonality;
        if let (Some(first), Some(last)) = (season.first(), season.last()) {
            let (lo, hi) = season.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
                (lo.min(p.observed), hi.max(p.observed))
            });
            lines.push(String::new());
            lines.push(format!("Seasonality ({} to {})", first.date, last.date));
            lines.push(format!(
                "  trend {:.1} -> {:.1}  observed range [{:.1}, {:.1}]",
                first.trend, last.trend, lo, hi
            ));
        }

        lines.push(String::new());
        lines.push("Diminishing Returns".to_string());
        for curve in &self.dataset.diminishing_returns {
            let max_spend = curve.points.last().map(|p| p.spend).unwrap_or(0.0);
            lines.push(format!(
                "  {:<8} a={:>7.1} b={:.5}  @50% {:>8.1}  @100% {:>8.1}",
                curve.channel,
                curve.params.a,
                curve.params.b,
                curve.params.returns_at(max_spend / 2.0),
                curve.max_return()
            ));
        }
        lines
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

/// `1234567` -> `"1,234,567"`
pub fn thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// `1234.5` -> `"$1,234.50"`
pub fn money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_digits(int_part), frac)
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::generate_dataset;
    use crate::theme::ThemeMode;

    #[test]
    fn test_number_formatting() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
        assert_eq!(money(20_000.0), "$20,000.00");
        assert_eq!(money(993.256), "$993.26");
        assert_eq!(money(-1_500.5), "-$1,500.50");
        assert_eq!(money(0.0), "$0.00");
    }

    #[test]
    fn test_snapshot_defaults() {
        let config = DashboardConfig::default();
        let snapshot = DashboardSnapshot::build(&config).unwrap();

        assert_eq!(snapshot.dataset, generate_dataset(&config.generator).unwrap());
        assert_eq!(snapshot.forecast.forecasted_bookings, 1_000);
        assert_eq!(snapshot.allocation.len(), 3);
        assert_eq!(snapshot.recommendation.len(), 3);
        assert!(snapshot.filter.dmas.len() <= 5);
        assert!(snapshot.revenue_per_office.len() <= 20);
        assert_eq!(
            snapshot.revenue_per_office.len(),
            snapshot.filtered_stores.len().min(20)
        );
    }

    #[test]
    fn test_snapshot_reproducible() {
        let config = DashboardConfig::default();
        let a = DashboardSnapshot::build(&config).unwrap().to_json().unwrap();
        let b = DashboardSnapshot::build(&config).unwrap().to_json().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_render_sections() {
        let snapshot = DashboardSnapshot::build(&DashboardConfig::default()).unwrap();
        let text = snapshot.render_text(&ThemeMode::Plain.palette(), 5);
        for heading in [
            "MEDIA PERFORMANCE DASHBOARD",
            "Overview",
            "Performance View",
            "Scenario Modeling + Planning",
            "Forecasted Revenue  $20,000.00",
            "Goal Attainment         85%",
            "Search   $500.00",
        ] {
            assert!(text.contains(heading), "missing {:?}", heading);
        }
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_inventory_rows_show_channel_mean() {
        let snapshot = DashboardSnapshot::build(&DashboardConfig::default()).unwrap();
        let text = snapshot.render_text(&ThemeMode::Plain.palette(), 5);
        let inventory = &snapshot.dataset.inventory;
        for channel in &inventory.channels {
            let mean = inventory.channel_mean(channel).unwrap();
            let expected = format!("avg {:.1}%", mean);
            assert!(
                text.lines()
                    .any(|l| l.contains(channel.as_str()) && l.contains(&expected)),
                "missing {} {}",
                channel,
                expected
            );
        }
    }

    #[test]
    fn test_json_uses_dashboard_column_names() {
        let snapshot = DashboardSnapshot::build(&DashboardConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(json["dataset"]["stores"][0]["Store"], "Store 1");
        assert!(json["dataset"]["seasonality"][0].get("Residual").is_some());
        assert_eq!(json["forecast"]["forecasted_revenue"], 20_000.0);
    }

    #[test]
    fn test_invalid_config_aborts_build() {
        let mut config = DashboardConfig::default();
        config.generator.channels.clear();
        assert!(matches!(
            DashboardSnapshot::build(&config),
            Err(DashboardError::Generator(_))
        ));
    }
}
