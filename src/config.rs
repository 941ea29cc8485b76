//! Dashboard configuration
//!
//! Generator sizes, filter selections, goals, scenario inputs and report
//! options. Loaded from TOML; every field has a default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DashboardError;
use crate::report::OutputFormat;
use crate::synth::GeneratorParams;
use crate::theme::ThemeMode;
use crate::views::{AllocationPlan, ChannelSpend, GoalMetric, GoalTarget, ViewError};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "MEDIA_DASH_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "media_dash.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Incremental budget to split across channels
    #[serde(default = "default_incremental_spend")]
    pub incremental_spend: f64,

    #[serde(default)]
    pub generator: GeneratorParams,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub goal: GoalConfig,

    /// MMM scenario slider positions
    #[serde(default)]
    pub scenario: ChannelSpend,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub allocation: AllocationPlan,
}

fn default_incremental_spend() -> f64 {
    crate::views::scenario::DEFAULT_INCREMENTAL_SPEND
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            incremental_spend: default_incremental_spend(),
            generator: GeneratorParams::default(),
            filter: FilterConfig::default(),
            goal: GoalConfig::default(),
            scenario: ChannelSpend::default(),
            report: ReportConfig::default(),
            allocation: AllocationPlan::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from environment or default path
    pub fn from_env() -> Self {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Using default dashboard config ({}): {}", path, e);
            Self::default()
        })
    }

    /// Save to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        self.generator.validate()?;
        self.scenario.validate()?;
        self.allocation.validate()?;
        self.allocation.allocate(self.incremental_spend)?;
        self.goal.target()?;
        if self.report.table_rows == 0 {
            return Err(DashboardError::Config(
                "report.table_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Optional overrides of the default DMA/region selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmas: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GoalConfig {
    #[serde(default)]
    pub metric: GoalMetric,
    /// Empty means "no goal entered"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl GoalConfig {
    pub fn target(&self) -> Result<Option<GoalTarget>, ViewError> {
        self.value
            .map(|value| GoalTarget::new(self.metric, value))
            .transpose()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default)]
    pub format: OutputFormat,
    /// Rows of the filtered store table shown in text output
    #[serde(default = "default_table_rows")]
    pub table_rows: usize,
}

fn default_table_rows() -> usize {
    10
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            format: OutputFormat::default(),
            table_rows: default_table_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::Frequency;

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.generator.seed, 42);
        assert_eq!(config.generator.store_count, 50);
        assert_eq!(config.incremental_spend, 1_000.0);
        assert!(config.goal.target().unwrap().is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: DashboardConfig = toml::from_str(
            r#"
            incremental_spend = 2500.0

            [generator]
            seed = 7
            store_count = 12

            [generator.sov_range]
            start = "2024-03-01"
            periods = 8
            frequency = "W"

            [goal]
            metric = "Revenue"
            value = 50000.0

            [report]
            theme = "light"
            "#,
        )
        .unwrap();

        assert_eq!(config.incremental_spend, 2_500.0);
        assert_eq!(config.generator.seed, 7);
        assert_eq!(config.generator.store_count, 12);
        assert_eq!(config.generator.channels.len(), 3);
        assert_eq!(config.generator.sov_range.periods, 8);
        assert_eq!(config.generator.sov_range.frequency, Frequency::Weekly);
        assert_eq!(config.generator.trend_range.periods, 30);
        assert_eq!(config.goal.metric, GoalMetric::Revenue);
        assert_eq!(config.report.theme, ThemeMode::Light);
        assert_eq!(config.report.table_rows, 10);
        assert_eq!(config.scenario, ChannelSpend::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("media_dash.toml");

        let mut config = DashboardConfig::default();
        config.generator.seed = 1234;
        config.filter.regions = Some(vec!["North".into()]);
        config.goal.value = Some(900.0);
        config.save(&path).unwrap();

        let loaded = DashboardConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = DashboardConfig::default();
        config.generator.store_count = 0;
        assert!(matches!(config.validate(), Err(DashboardError::Generator(_))));

        let mut config = DashboardConfig::default();
        config.scenario.search = 20_000;
        assert!(matches!(
            config.validate(),
            Err(DashboardError::View(ViewError::SpendOutOfRange { .. }))
        ));

        let mut config = DashboardConfig::default();
        config.goal.value = Some(-5.0);
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.incremental_spend = -1.0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.incremental_spend = 1_050.0;
        assert!(matches!(
            config.validate(),
            Err(DashboardError::View(ViewError::InvalidAmount(_)))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DashboardConfig::load(dir.path().join("absent.toml")).is_err());
    }
}
