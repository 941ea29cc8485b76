//! Store-level performance table
//!
//! One row per store. Every field is drawn independently; the booking
//! columns are decorative and are not reconciled with each other.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{GeneratorError, GeneratorResult};
use super::rng::{choose, seeded_rng, uniform_cents};

// =============================================================================
// CATEGORY SETS
// =============================================================================

/// US state abbreviations standing in for DMAs.
pub const US_STATE_ABBREV: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY",
];

pub const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

pub const STORE_CHANNELS: [&str; 3] = ["Search", "Social", "Display"];

pub const TIER_LABELS: [&str; 3] = ["Tier 1", "Tier 2", "Tier 3"];

/// Sampling bounds per numeric column.
///
/// Integer ranges are half-open. Real ranges are sampled half-open and
/// then rounded to cents, so the upper bound itself can appear.
pub mod bounds {
    use std::ops::Range;

    pub const ZIP: Range<u32> = 10_000..99_999;
    pub const SPEND: Range<u32> = 1_000..10_000;
    pub const IMPRESSIONS: Range<u32> = 10_000..100_000;
    pub const MEDIA_TRACKED_BOOKINGS: Range<u32> = 100..1_000;
    pub const MEDIA_CAC: Range<f64> = 5.0..50.0;
    pub const ONLINE_BOOKINGS: Range<u32> = 50..500;
    pub const OFFLINE_BOOKINGS: Range<u32> = 50..500;
    pub const TOTAL_BOOKINGS: Range<u32> = 100..1_000;
    pub const OPEN_14: Range<u32> = 10..100;
    pub const PATIENT_TO_SLOT_RATIO: Range<f64> = 0.5..2.0;
    pub const BO_RATE: Range<f64> = 0.1..0.9;
    pub const SPA: Range<f64> = 0.5..3.0;
    pub const ONLINE_CAC: Range<f64> = 5.0..50.0;
    pub const TOTAL_CAC: Range<f64> = 10.0..100.0;
}

// =============================================================================
// STORE RECORD
// =============================================================================

/// A single store row. Serialized column names match the dashboard headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    #[serde(rename = "Store")]
    pub store: String,
    #[serde(rename = "DMA")]
    pub dma: String,
    #[serde(rename = "ZIP")]
    pub zip: u32,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Channel")]
    pub channel: String,
    #[serde(rename = "Tier Label")]
    pub tier_label: String,
    #[serde(rename = "Spend")]
    pub spend: u32,
    #[serde(rename = "Impressions")]
    pub impressions: u32,
    #[serde(rename = "Media Tracked Bookings")]
    pub media_tracked_bookings: u32,
    #[serde(rename = "Media CAC")]
    pub media_cac: f64,
    #[serde(rename = "Online Bookings")]
    pub online_bookings: u32,
    #[serde(rename = "Offline Bookings")]
    pub offline_bookings: u32,
    #[serde(rename = "Total Bookings")]
    pub total_bookings: u32,
    #[serde(rename = "Open 14")]
    pub open_14: u32,
    #[serde(rename = "Patient to Slot Ratio")]
    pub patient_to_slot_ratio: f64,
    #[serde(rename = "BO Rate 14")]
    pub bo_rate_14: f64,
    #[serde(rename = "BO Rate L30")]
    pub bo_rate_l30: f64,
    #[serde(rename = "SPA L30")]
    pub spa_l30: f64,
    #[serde(rename = "SPA 3.0")]
    pub spa_3_0: f64,
    #[serde(rename = "Online CAC")]
    pub online_cac: f64,
    #[serde(rename = "Total CAC")]
    pub total_cac: f64,
}

impl StoreRecord {
    /// Draw one store. `index` is 1-based.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, index: usize) -> Self {
        Self {
            store: format!("Store {}", index),
            dma: choose(rng, &US_STATE_ABBREV).to_string(),
            zip: rng.gen_range(bounds::ZIP),
            region: choose(rng, &REGIONS).to_string(),
            channel: choose(rng, &STORE_CHANNELS).to_string(),
            tier_label: choose(rng, &TIER_LABELS).to_string(),
            spend: rng.gen_range(bounds::SPEND),
            impressions: rng.gen_range(bounds::IMPRESSIONS),
            media_tracked_bookings: rng.gen_range(bounds::MEDIA_TRACKED_BOOKINGS),
            media_cac: uniform_cents(rng, bounds::MEDIA_CAC),
            online_bookings: rng.gen_range(bounds::ONLINE_BOOKINGS),
            offline_bookings: rng.gen_range(bounds::OFFLINE_BOOKINGS),
            total_bookings: rng.gen_range(bounds::TOTAL_BOOKINGS),
            open_14: rng.gen_range(bounds::OPEN_14),
            patient_to_slot_ratio: uniform_cents(rng, bounds::PATIENT_TO_SLOT_RATIO),
            bo_rate_14: uniform_cents(rng, bounds::BO_RATE),
            bo_rate_l30: uniform_cents(rng, bounds::BO_RATE),
            spa_l30: uniform_cents(rng, bounds::SPA),
            spa_3_0: uniform_cents(rng, bounds::SPA),
            online_cac: uniform_cents(rng, bounds::ONLINE_CAC),
            total_cac: uniform_cents(rng, bounds::TOTAL_CAC),
        }
    }
}

// =============================================================================
// STORE TABLE
// =============================================================================

/// Ordered collection of store rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreTable {
    records: Vec<StoreRecord>,
}

impl StoreTable {
    pub fn from_records(records: Vec<StoreRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[StoreRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StoreRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct DMA codes in order of first appearance.
    pub fn distinct_dmas(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.dma.as_str()))
    }

    /// Distinct regions in order of first appearance.
    pub fn distinct_regions(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.region.as_str()))
    }
}

impl<'a> IntoIterator for &'a StoreTable {
    type Item = &'a StoreRecord;
    type IntoIter = std::slice::Iter<'a, StoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// Generate `store_count` stores from a fresh RNG seeded with `seed`.
pub fn generate_store_table(seed: u64, store_count: usize) -> GeneratorResult<StoreTable> {
    let mut rng = seeded_rng(seed);
    store_table_from_rng(&mut rng, store_count)
}

/// Generate `store_count` stores drawing from the caller's RNG.
pub fn store_table_from_rng<R: Rng + ?Sized>(
    rng: &mut R,
    store_count: usize,
) -> GeneratorResult<StoreTable> {
    if store_count == 0 {
        return Err(GeneratorError::invalid(
            "store_count",
            "at least one store is required",
        ));
    }

    let records = (1..=store_count)
        .map(|index| StoreRecord::generate(rng, index))
        .collect();

    debug!(store_count, "Generated store table");
    Ok(StoreTable::from_records(records))
}
