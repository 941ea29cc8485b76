//! Full dashboard dataset

use chrono::NaiveDate;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::calendar::DateRange;
use super::curves::{diminishing_returns_curves, ReturnsCurve, SpendGrid};
use super::error::{GeneratorError, GeneratorResult};
use super::inventory::{utilization_grid, InventoryGrid};
use super::rng::seeded_rng;
use super::series::{
    performance_trend, seasonality, share_of_voice, SeasonalityPoint, SovPoint, TrendPoint,
};
use super::store_table::{store_table_from_rng, StoreTable, STORE_CHANNELS};

pub(crate) fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("2024-01-01 is a valid date")
}

/// Size and shape parameters of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    pub seed: u64,
    pub store_count: usize,
    pub channels: Vec<String>,
    pub trend_range: DateRange,
    pub sov_range: DateRange,
    pub seasonality_range: DateRange,
    pub inventory_range: DateRange,
    pub curve: SpendGrid,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        let start = default_start();
        Self {
            seed: 42,
            store_count: 50,
            channels: STORE_CHANNELS.iter().map(|c| c.to_string()).collect(),
            trend_range: DateRange::daily(start, 30),
            sov_range: DateRange::weekly(start, 20),
            seasonality_range: DateRange::daily(start, 365),
            inventory_range: DateRange::weekly(start, 12),
            curve: SpendGrid::default(),
        }
    }
}

impl GeneratorParams {
    /// Fail fast on parameters that would yield degenerate output.
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.store_count == 0 {
            return Err(GeneratorError::invalid(
                "store_count",
                "at least one store is required",
            ));
        }
        validate_channels(&self.channels)?;
        self.trend_range.validate("trend_range")?;
        self.sov_range.validate("sov_range")?;
        self.seasonality_range.validate("seasonality_range")?;
        self.inventory_range.validate("inventory_range")?;
        self.curve.validate()
    }
}

/// Channels must be a non-empty set of non-blank names.
pub fn validate_channels(channels: &[String]) -> GeneratorResult<()> {
    if channels.is_empty() {
        return Err(GeneratorError::invalid(
            "channels",
            "at least one channel is required",
        ));
    }
    for (i, channel) in channels.iter().enumerate() {
        if channel.trim().is_empty() {
            return Err(GeneratorError::invalid("channels", "channel names must not be blank"));
        }
        if channels[..i].contains(channel) {
            return Err(GeneratorError::invalid(
                "channels",
                format!("duplicate channel `{}`", channel),
            ));
        }
    }
    Ok(())
}

/// Everything the dashboard displays, generated from one seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDataset {
    pub seed: u64,
    pub stores: StoreTable,
    pub performance_trend: Vec<TrendPoint>,
    pub share_of_voice: Vec<SovPoint>,
    pub inventory: InventoryGrid,
    pub seasonality: Vec<SeasonalityPoint>,
    pub diminishing_returns: Vec<ReturnsCurve>,
}

/// Generate a dataset from a fresh RNG seeded with `params.seed`.
pub fn generate_dataset(params: &GeneratorParams) -> GeneratorResult<DashboardDataset> {
    let mut rng = seeded_rng(params.seed);
    generate_with(&mut rng, params)
}

/// Generate a dataset from the caller's RNG.
///
/// Draw order: stores, trend, share of voice, inventory, seasonality,
/// curves.
pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    params: &GeneratorParams,
) -> GeneratorResult<DashboardDataset> {
    params.validate()?;

    let stores = store_table_from_rng(rng, params.store_count)?;
    let performance_trend = performance_trend(rng, &params.trend_range)?;
    let regions = stores.distinct_regions();
    let share_of_voice = share_of_voice(rng, &regions, &params.sov_range)?;
    let inventory = utilization_grid(rng, &params.channels, &params.inventory_range)?;
    let seasonality = seasonality(rng, &params.seasonality_range)?;
    let diminishing_returns = diminishing_returns_curves(rng, &params.channels, &params.curve)?;

    debug!(
        seed = params.seed,
        stores = stores.len(),
        regions = regions.len(),
        channels = params.channels.len(),
        "Generated dashboard dataset"
    );

    Ok(DashboardDataset {
        seed: params.seed,
        stores,
        performance_trend,
        share_of_voice,
        inventory,
        seasonality,
        diminishing_returns,
    })
}

/// Generate one dataset per seed in parallel.
///
/// Each generation owns its RNG, so results match `generate_dataset`
/// run sequentially for the same seed, in input order.
pub fn generate_many(
    params: &GeneratorParams,
    seeds: &[u64],
) -> GeneratorResult<Vec<DashboardDataset>> {
    params.validate()?;
    info!(runs = seeds.len(), "Generating datasets in parallel");

    seeds
        .par_iter()
        .map(|&seed| {
            let run = GeneratorParams {
                seed,
                ..params.clone()
            };
            generate_dataset(&run)
        })
        .collect()
}
